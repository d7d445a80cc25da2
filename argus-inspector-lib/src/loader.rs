use std::{fs, io, path::Path};

use log::info;
use panoptes::module::{Module, ModuleLoadError};
use thiserror::Error;

use crate::source::SourceText;

const BITCODE_MAGIC: [u8; 4] = [0x42, 0x43, 0xC0, 0xDE];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read \"{path}\": {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("\"{path}\" is neither bitcode nor UTF-8 textual IR")]
    NotText { path: String },
    #[error(transparent)]
    Parse(#[from] ModuleLoadError),
}

/// A module together with the listing the index should be scanned against.
#[derive(Debug)]
pub struct LoadedModule {
    module: Module,
    source: SourceText,
}

impl LoadedModule {
    #[must_use]
    pub const fn module(&self) -> &Module {
        &self.module
    }

    #[must_use]
    pub const fn source(&self) -> &SourceText {
        &self.source
    }
}

/// Reads a `.ll` or `.bc` file. Bitcode is recognized by its magic and
/// rendered back to canonical text, so the scanned listing always matches the
/// in-memory module; anything else is treated as textual IR and scanned
/// as-is.
///
/// # Errors
/// Returns a [`LoadError`] when the file cannot be read, is neither bitcode
/// nor UTF-8 text, or fails to parse.
pub fn load(path: &Path) -> Result<LoadedModule, LoadError> {
    let name = path.display().to_string();

    let bytes = fs::read(path).map_err(|source| LoadError::Read {
        path: name.clone(),
        source,
    })?;

    if bytes.starts_with(&BITCODE_MAGIC) {
        info!("loading \"{name}\" as bitcode");

        let module = Module::parse_bitcode(&name, &bytes)?;
        let source = SourceText::new(&module.print_to_string());

        return Ok(LoadedModule { module, source });
    }

    let text = String::from_utf8(bytes).map_err(|_| LoadError::NotText { path: name.clone() })?;

    info!("loading \"{name}\" as textual IR");

    let module = Module::parse_ir(&name, &text)?;

    Ok(LoadedModule {
        module,
        source: SourceText::new(&text),
    })
}
