//! Export handlers: write the registry snapshot to a spreadsheet or
//! word-processor document.

use std::fs;
use std::path::PathBuf;

use rollcall_api::RegistryClient;
use rollcall_core::Registrar;
use rollcall_export::{export_document, export_spreadsheet};

use crate::cli::{ExportArgs, ExportFormat, GlobalOpts};
use crate::error::CliError;

use super::util;

pub async fn handle(
    client: RegistryClient,
    args: ExportArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let token = util::require_token()?;
    let registrar = Registrar::new(client, token);

    // Export always works from a fresh snapshot, never a stale cache.
    registrar.refresh().await?;
    let snapshot = registrar.store().snapshot();

    let bytes = match args.format {
        ExportFormat::Xlsx => export_spreadsheet(&snapshot)?,
        ExportFormat::Docx => export_document(&snapshot)?,
    };

    let path: PathBuf = args
        .out
        .unwrap_or_else(|| PathBuf::from(args.format.default_file_name()));
    fs::write(&path, &bytes)?;

    if !global.quiet {
        eprintln!("Wrote {} records to {}", snapshot.len(), path.display());
    }
    Ok(())
}
