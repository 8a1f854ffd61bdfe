// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    NoData,
    Encode(String),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoData => f.write_str("No data to export"),
            Self::Encode(reason) => write!(f, "CSV encoding failed: {reason}"),
        }
    }
}

impl std::error::Error for ExportError {}
