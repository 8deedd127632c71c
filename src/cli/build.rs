//! Build the query output for the search action

use std::path::PathBuf;

use crate::output::{Output, OutputOptions, build_output};

use super::{CliError, load_catalog};

/// Options for the build command
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub input: String,
    /// Overrides the catalog's implicit query
    pub implicit_query: Option<String>,
    pub catalog: Option<PathBuf>,
}

pub fn execute_build(options: &BuildOptions) -> Result<Output, CliError> {
    let implicit_query = match &options.implicit_query {
        Some(query) => Some(query.clone()),
        None => load_catalog(options.catalog.as_deref(), &[])?.implicit_query,
    };
    Ok(build_output(&options.input, &OutputOptions { implicit_query }))
}
