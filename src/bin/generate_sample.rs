use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Base figures per neighborhood:
/// (name, male 2022, female 2022, salary, robbery mean, property value)
const NEIGHBORHOODS: [(&str, f64, f64, f64, f64, f64); 7] = [
    ("Santa Cruz", 81_000.0, 86_500.0, 1_650.35, 141.2, 402_000.0),
    ("Jacarepaguá", 75_800.0, 81_900.0, 3_980.10, 96.5, 1_150_000.0),
    ("Barra da Tijuca", 64_300.0, 71_600.0, 9_712.80, 88.9, 3_870_000.0),
    ("Bangu", 117_000.0, 126_100.0, 2_030.55, 152.0, 515_000.0),
    ("Realengo", 85_400.0, 94_700.0, 2_210.00, 119.4, 468_000.0),
    ("Campo Grande", 159_900.0, 172_000.0, 2_245.75, 133.7, 690_000.0),
    // outside the allow-list on purpose
    ("Copacabana", 63_100.0, 83_300.0, 7_840.20, 210.6, 2_950_000.0),
];

const AGE_BRACKETS: [&str; 5] = [
    "15 a 19 anos",
    "20 a 24 anos",
    "25 a 29 anos",
    "30 a 39 anos",
    "40 a 49 anos",
];

/// Share of the population in each bracket.
const BRACKET_SHARE: [f64; 5] = [0.065, 0.07, 0.075, 0.155, 0.14];

/// Deterministic jitter in `[-spread, spread]` (64-bit LCG).
struct Jitter(u64);

impl Jitter {
    fn next(&mut self, spread: f64) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let unit = (self.0 >> 11) as f64 / (1u64 << 53) as f64;
        (unit * 2.0 - 1.0) * spread
    }
}

fn decimal_comma(v: f64, places: usize) -> String {
    format!("{v:.places$}").replace('.', ",")
}

fn write_csv(path: &Path, delimiter: u8, header: &[String], rows: &[Vec<String>]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Encode text as Latin-1; every character must fit in one byte.
fn latin1(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .map(|c| match u8::try_from(c) {
            Ok(b) => Ok(b),
            Err(_) => bail!("character {c:?} has no Latin-1 encoding"),
        })
        .collect()
}

fn population(dir: &Path) -> Result<()> {
    let header = ["bairro", "Homens/2022", "Mulheres/2022"].map(String::from);
    let rows: Vec<Vec<String>> = NEIGHBORHOODS
        .iter()
        .map(|&(name, male, female, ..)| vec![name.into(), format!("{male:.0}"), format!("{female:.0}")])
        .collect();
    write_csv(&dir.join("populacao.csv"), b',', &header, &rows)
}

fn salary(dir: &Path) -> Result<()> {
    let header = ["bairro", "valor médio"].map(String::from);
    let rows: Vec<Vec<String>> = NEIGHBORHOODS
        .iter()
        .map(|&(name, _, _, salary, ..)| vec![name.into(), decimal_comma(salary, 2)])
        .collect();
    write_csv(&dir.join("salariomedia.csv"), b';', &header, &rows)
}

fn robbery(dir: &Path) -> Result<()> {
    let header = ["Bairros", "Média"].map(String::from);
    // Listed in the order the chart should show them, bottom to top.
    let mut listed: Vec<_> = NEIGHBORHOODS.iter().collect();
    listed.sort_by(|a, b| a.4.total_cmp(&b.4));
    let rows: Vec<Vec<String>> = listed
        .iter()
        .map(|&&(name, _, _, _, mean, _)| vec![name.into(), decimal_comma(mean, 1)])
        .collect();
    write_csv(&dir.join("roubo.csv"), b';', &header, &rows)
}

fn age_brackets(dir: &Path) -> Result<()> {
    let mut header = vec!["bairro".to_string()];
    for sex in ["masculino", "feminino"] {
        for bracket in AGE_BRACKETS {
            header.push(format!("Sexo {sex}, {bracket}"));
        }
    }
    let rows: Vec<Vec<String>> = NEIGHBORHOODS
        .iter()
        .map(|&(name, male, female, ..)| {
            let mut row = vec![name.to_string()];
            for total in [male, female] {
                row.extend(BRACKET_SHARE.iter().map(|s| decimal_comma((total * s).round(), 0)));
            }
            row
        })
        .collect();

    // Build in memory, then re-encode as Latin-1.
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(Vec::new());
    writer.write_record(&header)?;
    for row in &rows {
        writer.write_record(row)?;
    }
    let buffer = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing CSV buffer: {}", e.error()))?;
    let utf8 = String::from_utf8(buffer)?;
    let path = dir.join("População_Residente_por_Sexo_Faixa_Etária.csv");
    std::fs::write(&path, latin1(&utf8)?).with_context(|| format!("writing {}", path.display()))
}

fn property(dir: &Path) -> Result<()> {
    let header = ["bairro", "uso", "média_valor_imóvel"].map(String::from);
    let mut jitter = Jitter(42);
    let mut rows = Vec::new();
    for &(name, _, _, _, _, value) in &NEIGHBORHOODS {
        for (i, usage) in ["NAO RESIDENCIAL", "NAO RESIDENCIAL", "RESIDENCIAL"].iter().enumerate() {
            // every other row gets the stray padding seen in the real export
            let bairro = if i % 2 == 0 { format!(" {name} ") } else { name.to_string() };
            let v = value * (1.0 + jitter.next(0.08));
            rows.push(vec![bairro, usage.to_string(), format!("{v:.2}")]);
        }
    }
    write_csv(&dir.join("imovel.csv"), b',', &header, &rows)
}

fn main() -> Result<()> {
    let dir = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| "sample_data".into()));
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    population(&dir)?;
    salary(&dir)?;
    robbery(&dir)?;
    age_brackets(&dir)?;
    property(&dir)?;

    println!(
        "Wrote 5 tables for {} neighborhoods to {}",
        NEIGHBORHOODS.len(),
        dir.display()
    );
    Ok(())
}
