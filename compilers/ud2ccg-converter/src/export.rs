use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::corpus::Conversion;
use crate::derivation::write_derivation;
use crate::error::ConvertError;
use crate::lexicon::Lexicon;

/// Files written for one converted input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub derivations: PathBuf,
    pub lexicon: PathBuf,
}

/// Every exported sentence in `.auto` format.
pub fn render_derivations(conversion: &Conversion) -> String {
    let mut out = String::new();
    for sentence in &conversion.sentences {
        // Writing into a String cannot fail
        let _ = write_derivation(&mut out, sentence);
    }
    out
}

pub fn build_lexicon(conversion: &Conversion) -> Lexicon {
    let mut lexicon = Lexicon::new();
    for sentence in &conversion.sentences {
        lexicon.add_sentence(sentence);
    }
    lexicon
}

/// Writes `<stem>.auto` and `<stem>.lexicon` into `directory`, creating it
/// if needed.
pub fn export(conversion: &Conversion, directory: &Path, stem: &str) -> Result<ExportPaths, ConvertError> {
    fs::create_dir_all(directory).map_err(|source| ConvertError::io(directory, source))?;

    let paths = ExportPaths {
        derivations: directory.join(format!("{stem}.auto")),
        lexicon: directory.join(format!("{stem}.lexicon")),
    };
    fs::write(&paths.derivations, render_derivations(conversion))
        .map_err(|source| ConvertError::io(&paths.derivations, source))?;

    let lexicon = build_lexicon(conversion);
    fs::write(&paths.lexicon, lexicon.to_string()).map_err(|source| ConvertError::io(&paths.lexicon, source))?;

    info!(
        derivations = %paths.derivations.display(),
        sentences = conversion.sentences.len(),
        lexemes = lexicon.len(),
        "exported"
    );
    Ok(paths)
}
