use tabled::Table;

use crate::{parser, types::ParseTableRow, warning};

pub fn parse(names: Vec<String>) {
    let rows: Vec<ParseTableRow> = names
        .into_iter()
        .map(|name| {
            let parsed = parser::parse(&name);
            if parsed.ambiguous {
                warning!("Unmatched ']' in '{}', using the whole name as title", name);
            }
            ParseTableRow {
                file: name,
                author: parsed.author_info,
                title: parsed.source_title,
            }
        })
        .collect();

    println!("{}", Table::new(rows));
}
