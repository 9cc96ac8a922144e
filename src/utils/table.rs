use crate::models::Student;

const HEADERS: [&str; 4] = ["id", "name", "group", "level"];

/// Render students as a boxed text table for operator-facing logs.
pub fn render_students(students: &[Student]) -> String {
    let rows: Vec<[String; 4]> = students
        .iter()
        .map(|s| {
            [
                s.id.to_string(),
                s.name.clone(),
                s.group.clone(),
                s.level.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let separator = {
        let mut line = String::from("+");
        for width in &widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line
    };

    let format_row = |cells: &[&str]| {
        let mut line = String::from("|");
        for (cell, width) in cells.iter().zip(widths.iter()) {
            let pad = width - cell.chars().count();
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(pad + 1));
            line.push('|');
        }
        line
    };

    let mut out = Vec::with_capacity(rows.len() + 4);
    out.push(separator.clone());
    out.push(format_row(&HEADERS[..]));
    out.push(separator.clone());
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push(format_row(cells.as_slice()));
    }
    out.push(separator);

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: i64, name: &str) -> Student {
        Student {
            id,
            name: name.to_string(),
            group: "1A".to_string(),
            level: "Basica".to_string(),
        }
    }

    #[test]
    fn test_empty_table_has_only_headers() {
        let table = render_students(&[]);
        assert_eq!(
            table,
            "+----+------+-------+-------+\n\
             | id | name | group | level |\n\
             +----+------+-------+-------+\n\
             +----+------+-------+-------+"
        );
    }

    #[test]
    fn test_columns_widen_to_fit_values() {
        let table = render_students(&[student(1111111, "Ana"), student(22, "María José")]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[3], "| 1111111 | Ana        | 1A    | Basica |");
        assert_eq!(lines[4], "| 22      | María José | 1A    | Basica |");
        // Every line has the same display width
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
    }
}
