//! Plain-text and JSON rendering of contact lists.

use contactbook_core::Contact;

const HEADERS: [&str; 5] = ["ID", "Name", "Phone", "Email", "Address"];

/// Renders contacts as an aligned text table with a header row.
pub fn render_table(contacts: &[Contact]) -> String {
    let rows = contacts
        .iter()
        .map(|contact| {
            [
                contact.id.to_string(),
                contact.name.clone(),
                contact.phone.clone(),
                contact.email.clone(),
                contact.address.clone(),
            ]
        })
        .collect::<Vec<_>>();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, HEADERS.iter().copied(), &widths);
    for row in &rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

/// Renders contacts as a pretty-printed JSON array.
pub fn render_json(contacts: &[Contact]) -> Result<String, String> {
    serde_json::to_string_pretty(contacts).map_err(|err| format!("failed to encode contacts: {err}"))
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::{render_json, render_table};
    use contactbook_core::ContactDraft;

    #[test]
    fn table_aligns_columns_to_widest_cell() {
        let contacts = vec![
            ContactDraft::new("Alice Smith", "555-0001", "a@x.com", "1 Main St").into_contact(1),
            ContactDraft::new("Bob", "555-0002", "", "").into_contact(12),
        ];
        let table = render_table(&contacts);
        let lines = table.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID  Name         Phone"));
        assert!(lines[1].starts_with("1   Alice Smith  555-0001"));
        assert_eq!(lines[2], "12  Bob          555-0002");
    }

    #[test]
    fn empty_list_renders_header_only() {
        assert_eq!(render_table(&[]), "ID  Name  Phone  Email  Address\n");
    }

    #[test]
    fn json_uses_field_names() {
        let contacts = vec![ContactDraft::new("Alice", "555", "", "").into_contact(3)];
        let json = render_json(&contacts).unwrap();
        assert!(json.contains("\"id\": 3"));
        assert!(json.contains("\"name\": \"Alice\""));
    }
}
