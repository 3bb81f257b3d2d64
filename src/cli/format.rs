//! Format output dispatch helpers

/// Dispatch output by format.
///
/// The json branch returns a `Result`; the human branch is skipped under
/// `--quiet`.
///
/// ```rust,ignore
/// output_by_format!(ctx.cli,
///     json => { print_json(&summary) },
///     human => { println!("{} nodes", summary.nodes); }
/// )?;
/// ```
#[macro_export]
macro_rules! output_by_format {
    ($cli:expr, json => $json:expr, human => $human:block) => {
        match $cli.format {
            $crate::cli::OutputFormat::Json => $json,
            $crate::cli::OutputFormat::Human => {
                if !$cli.quiet $human
                Ok(())
            }
        }
    };
}
