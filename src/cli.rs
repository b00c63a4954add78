//! Command-line arguments.

use crate::syllables::SyllableOrder;
use crate::utils::SessionOverrides;
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    /// Consonant + vowel ("БА")
    Cv,
    /// Vowel + consonant ("АБ")
    Vc,
}

impl From<OrderArg> for SyllableOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Cv => SyllableOrder::Cv,
            OrderArg::Vc => SyllableOrder::Vc,
        }
    }
}

/// Learn to read Russian syllables in the terminal.
#[derive(Debug, Parser)]
#[command(name = "slogi", disable_version_flag = true)]
pub struct Cli {
    /// Letter order for this run (the saved setting is kept)
    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,

    /// Never speak, in any mode
    #[arg(long)]
    pub mute: bool,

    /// Show syllables in lowercase for this run
    #[arg(long)]
    pub lowercase: bool,

    /// Log filter, e.g. "debug" (defaults to RUST_LOG, then "info")
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Print version information and exit
    #[arg(short = 'V', long)]
    pub version: bool,
}

impl Cli {
    pub fn overrides(&self) -> SessionOverrides {
        SessionOverrides {
            order: self.order.map(Into::into),
            lowercase: self.lowercase,
            mute: self.mute,
        }
    }
}
