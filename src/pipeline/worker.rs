use crate::{
    management::Lookup,
    organizer, parser,
    translator::{MAX_ATTEMPTS, Translation},
    types::{FileOutcome, FileStatus, SourceFile, Stage, TitleSource},
    warning,
};

use super::Context;

/// Runs one file through parse → cache lookup or translation → placement.
///
/// Never fails: problems end up in the returned [`FileOutcome`].
pub async fn process_file(ctx: &Context, file: &SourceFile) -> FileOutcome {
    let parsed = parser::parse(&file.name);

    if parsed.ambiguous {
        ctx.progress.suspend(|| {
            warning!(
                "Unmatched ']' in '{}', using the whole name as title",
                file.name
            )
        });
    }

    if parsed.source_title.is_empty() {
        return FileOutcome {
            name: file.name.clone(),
            status: FileStatus::Failed {
                stage: Stage::Parse,
                reason: "no title left in file name".to_string(),
            },
        };
    }

    let title = parsed.source_title.as_str();
    let lookup = ctx
        .cache
        .get_or_compute(title, || ctx.translator.translate(title))
        .await;

    let source = match &lookup {
        Lookup::Hit(_) => TitleSource::CacheHit,
        Lookup::Miss(Translation::Translated(_)) => TitleSource::Translated,
        Lookup::Miss(Translation::Passthrough(_)) => TitleSource::Passthrough,
        Lookup::Miss(Translation::Fallback { errors, .. }) => {
            ctx.progress.suspend(|| {
                for (attempt, e) in errors.iter().enumerate() {
                    warning!(
                        "Translation attempt {}/{} for '{}' failed: {}",
                        attempt + 1,
                        MAX_ATTEMPTS,
                        title,
                        e
                    );
                }
                warning!("Keeping untranslated title '{}'", title);
            });
            TitleSource::Fallback
        }
    };

    let folder = organizer::destination_folder_name(&parsed.author_info, lookup.text());

    match organizer::place(&file.path, &folder, &ctx.target_dir, ctx.mode).await {
        Ok(destination) => FileOutcome {
            name: file.name.clone(),
            status: FileStatus::Placed {
                destination,
                source,
            },
        },
        Err(e) => {
            ctx.progress
                .suspend(|| warning!("Cannot place '{}': {}", file.name, e));
            FileOutcome {
                name: file.name.clone(),
                status: FileStatus::Failed {
                    stage: Stage::Organize,
                    reason: e.to_string(),
                },
            }
        }
    }
}
