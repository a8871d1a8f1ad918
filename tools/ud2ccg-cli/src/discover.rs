//! Finding the files of a treebank collection laid out like the UD release:
//! `UD_<Language>-<Treebank>/<code>-ud-<split>.conllu`, with the semantic
//! role layer under `UP_<Language>-<Treebank>/<code>-up-<split>.conllup`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// One input file and where its outputs go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub conllu: PathBuf,
    pub conllup: Option<PathBuf>,
    pub export_dir: PathBuf,
}

/// `UD_English-EWT` → `("English", "EWT")`
fn treebank_name(directory: &str) -> Option<(&str, &str)> {
    directory.strip_prefix("UD_")?.split_once('-')
}

/// `en_ewt-ud-train.conllu` → `en_ewt-up-train.conllup`
fn conllup_file_name(conllu: &str) -> Option<String> {
    let stem = conllu.strip_suffix(".conllu")?;
    let parts: Vec<&str> = stem.split('-').collect();
    match parts.as_slice() {
        [code, _, split, ..] => Some(format!("{code}-up-{split}.conllup")),
        _ => None,
    }
}

/// Every `.conllu` file inside a `UD_*` directory under `ud_path`, in
/// file-name order. Outputs of a treebank go to a directory of the same name
/// under `export_path`.
pub fn discover(ud_path: &Path, up_path: Option<&Path>, export_path: &Path) -> Result<Vec<Job>> {
    let mut jobs = Vec::new();

    for entry in WalkDir::new(ud_path).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walking {}", ud_path.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        if !file_name.ends_with(".conllu") {
            continue;
        }
        let Some(directory) = entry
            .path()
            .parent()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
        else {
            continue;
        };
        let Some((language, treebank)) = treebank_name(&directory) else {
            continue;
        };

        let conllup = up_path.and_then(|up| {
            let path = up
                .join(format!("UP_{language}-{treebank}"))
                .join(conllup_file_name(&file_name)?);
            path.is_file().then_some(path)
        });

        jobs.push(Job {
            conllu: entry.path().to_path_buf(),
            conllup,
            export_dir: export_path.join(&directory),
        });
    }

    Ok(jobs)
}
