use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Optional overrides file looked up inside the data directory.
pub const CONFIG_FILE_NAME: &str = "bairros.json";

/// Environment variable consulted when no data directory is passed on the
/// command line.
pub const DATA_DIR_ENV: &str = "BAIRROS_DATA_DIR";

// ---------------------------------------------------------------------------
// CSV dialects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecimalSeparator {
    Dot,
    Comma,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    Utf8,
    Latin1,
}

/// Where one table lives and how its CSV is spelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSource {
    pub file: String,
    pub delimiter: char,
    pub decimal: DecimalSeparator,
    pub encoding: TextEncoding,
}

impl TableSource {
    fn comma_separated(file: &str) -> Self {
        TableSource {
            file: file.to_string(),
            delimiter: ',',
            decimal: DecimalSeparator::Dot,
            encoding: TextEncoding::Utf8,
        }
    }

    fn semicolon_separated(file: &str) -> Self {
        TableSource {
            file: file.to_string(),
            delimiter: ';',
            decimal: DecimalSeparator::Comma,
            encoding: TextEncoding::Utf8,
        }
    }

    fn latin1(mut self) -> Self {
        self.encoding = TextEncoding::Latin1;
        self
    }
}

/// The five input files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSources {
    pub robbery: TableSource,
    pub population: TableSource,
    pub salary: TableSource,
    pub age_brackets: TableSource,
    pub property: TableSource,
}

impl Default for DataSources {
    fn default() -> Self {
        DataSources {
            robbery: TableSource::semicolon_separated("roubo.csv"),
            population: TableSource::comma_separated("populacao.csv"),
            salary: TableSource::semicolon_separated("salariomedia.csv"),
            age_brackets: TableSource::semicolon_separated(
                "População_Residente_por_Sexo_Faixa_Etária.csv",
            )
            .latin1(),
            property: TableSource::comma_separated("imovel.csv"),
        }
    }
}

// ---------------------------------------------------------------------------
// Neighborhoods
// ---------------------------------------------------------------------------

/// Allow-list and colour assignment shared by every slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub neighborhoods: Vec<String>,
    pub colors: BTreeMap<String, String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        let entries = [
            ("Santa Cruz", "#1f77b4"),
            ("Jacarepaguá", "#ff7f0e"),
            ("Barra da Tijuca", "#2ca02c"),
            ("Bangu", "#d62728"),
            ("Realengo", "#9467bd"),
            ("Campo Grande", "#d5d83d"),
        ];
        ChartConfig {
            neighborhoods: entries.iter().map(|(n, _)| n.to_string()).collect(),
            colors: entries
                .iter()
                .map(|(n, c)| (n.to_string(), c.to_string()))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sources: DataSources,
    #[serde(flatten)]
    pub chart: ChartConfig,
}

impl AppConfig {
    /// Read `bairros.json` from `data_dir`, falling back to defaults when
    /// the file is absent.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            log::info!("No {CONFIG_FILE_NAME} in {}, using defaults", data_dir.display());
            return Ok(AppConfig::default());
        }
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

/// Resolve the data directory: CLI argument, environment, folder picker,
/// then the working directory.
pub fn resolve_data_dir(arg: Option<String>) -> Result<PathBuf> {
    if let Some(dir) = arg {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    if let Some(dir) = rfd::FileDialog::new()
        .set_title("Select the folder with the neighborhood CSV files")
        .pick_folder()
    {
        return Ok(dir);
    }
    std::env::current_dir().context("resolving current directory")
}
