use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::Rule;

/// Row density for rendered rule lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Density {
    Compact,
    #[default]
    Comfortable,
    Spacious,
}

impl Density {
    pub fn label(&self) -> &'static str {
        match self {
            Density::Compact => "compact",
            Density::Comfortable => "comfortable",
            Density::Spacious => "spacious",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Density::Compact => Density::Comfortable,
            Density::Comfortable => Density::Spacious,
            Density::Spacious => Density::Compact,
        }
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown density '{0}'")]
pub struct UnknownDensity(pub String);

impl FromStr for Density {
    type Err = UnknownDensity;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Density::Compact),
            "comfortable" | "default" => Ok(Density::Comfortable),
            "spacious" => Ok(Density::Spacious),
            _ => Err(UnknownDensity(value.to_string())),
        }
    }
}

/// Spacing applied to one rendered rule row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    pub padding: usize,
    pub gap: usize,
    pub show_parameters: bool,
}

pub fn row_layout(density: Density) -> RowLayout {
    match density {
        Density::Compact => RowLayout {
            padding: 0,
            gap: 0,
            show_parameters: false,
        },
        Density::Comfortable => RowLayout {
            padding: 2,
            gap: 0,
            show_parameters: true,
        },
        Density::Spacious => RowLayout {
            padding: 4,
            gap: 1,
            show_parameters: true,
        },
    }
}

/// Plain-text row for a rule at `position`, shaped by `density`.
pub fn render_row(position: usize, rule: &Rule, density: Density) -> String {
    let layout = row_layout(density);
    let pad = " ".repeat(layout.padding);
    let mut row = format!("{pad}{}. {} [{}]", position + 1, rule.label, rule.id);

    if layout.show_parameters {
        for (key, value) in &rule.parameters {
            row.push('\n');
            row.push_str(&format!("{pad}    {key} = {value}"));
        }
    }
    for _ in 0..layout.gap {
        row.push('\n');
    }
    row
}
