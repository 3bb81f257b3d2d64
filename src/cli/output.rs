// `ValueEnum` for OutputFormat is implemented in trailheat-core (feature "clap")
// because the orphan rule forbids implementing it here.
pub use trailheat_core::format::OutputFormat;
