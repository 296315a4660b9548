use crate::args::Verb;
use cfgsync_engine::{BulkReport, ItemOutcome, SyncEngine};
use cfgsync_store::KvClient;
use std::io::{self, Write};

/// Runs one verb, writing results to `out` and per-item problems to `err`.
///
/// Returns `false` when a bulk verb recorded at least one failed item.
///
/// # Errors
///
/// Any error of a single-item verb, a fatal error of a bulk verb, or a failed write to `out`.
pub(crate) async fn run<C, O, E>(
    engine: &SyncEngine<C>,
    verb: Verb,
    out: &mut O,
    err: &mut E,
) -> anyhow::Result<bool>
where
    C: KvClient,
    O: Write,
    E: Write,
{
    match verb {
        Verb::Get { name, .. } => {
            let value = engine.get(&name).await?;
            out.write_all(&value)?;
            out.flush()?;
            Ok(true)
        },
        Verb::Set { name, file, .. } => {
            engine.set(&name, &file).await?;
            writeln!(out, "set {name} success")?;
            Ok(true)
        },
        Verb::Del { name, .. } => {
            engine.del(&name).await?;
            writeln!(out, "del {name} success")?;
            Ok(true)
        },
        Verb::Dump { dir, .. } => {
            let report = engine.dump(&dir).await?;
            Ok(print_report("dump", &report, out, err)?)
        },
        Verb::Restore { dir, .. } => {
            let report = engine.restore(&dir).await?;
            Ok(print_report("restore", &report, out, err)?)
        },
    }
}

fn print_report(
    verb: &str,
    report: &BulkReport,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<bool> {
    for item in report.items() {
        match &item.outcome {
            ItemOutcome::Synced => writeln!(out, "{verb} {}", item.name)?,
            ItemOutcome::Skipped { reason } => {
                writeln!(err, "{verb} {} skipped: {reason}", item.name)?;
            },
            ItemOutcome::Failed(e) => writeln!(err, "{verb} {} failed: {e}", item.name)?,
        }
    }
    out.flush()?;
    Ok(report.is_clean())
}
