use batchren_core::Preview;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PreviewArg {
    Table,
    Summary,
    Json,
    None,
}

impl From<PreviewArg> for Preview {
    fn from(arg: PreviewArg) -> Self {
        match arg {
            PreviewArg::Table => Self::Table,
            PreviewArg::Summary => Self::Summary,
            PreviewArg::Json => Self::Json,
            PreviewArg::None => Self::None,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

impl From<OutputFormat> for batchren_core::OutputFormat {
    fn from(arg: OutputFormat) -> Self {
        match arg {
            OutputFormat::Summary => Self::Summary,
            OutputFormat::Json => Self::Json,
        }
    }
}
