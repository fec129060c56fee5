use std::path::PathBuf;

use tabled::Table;

use crate::{config, error, info, management, types::CacheTableRow};

pub async fn cache(cache_file: Option<PathBuf>, search: Option<String>) {
    let path = config::cache_file(cache_file);
    let entries = match management::load_snapshot(&path).await {
        Ok(entries) => entries,
        Err(e) => error!("Cannot load translation cache {}: {}", path.display(), e),
    };

    let total = entries.len();
    let search_term = search.map(|s| s.to_lowercase());

    let rows: Vec<CacheTableRow> = entries
        .into_iter()
        .filter(|(source, translated)| match &search_term {
            Some(term) => {
                source.to_lowercase().contains(term) || translated.to_lowercase().contains(term)
            }
            None => true,
        })
        .map(|(source, translated)| CacheTableRow { source, translated })
        .collect();

    if rows.is_empty() {
        info!("No cached translations found in {}", path.display());
        return;
    }

    println!("{}", Table::new(&rows));
    info!("{} of {} cached translations shown", rows.len(), total);
}
