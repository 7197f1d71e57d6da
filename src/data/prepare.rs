use std::collections::BTreeMap;

use super::filter::{allowed_rows, AllowList};
use super::model::{Chart, ChartRow, Measure, RawTables, Table};
use crate::color::NeighborhoodPalette;
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Source column names
// ---------------------------------------------------------------------------

const NEIGHBORHOOD: &str = "bairro";

const MALE_2022: &str = "Homens/2022";
const FEMALE_2022: &str = "Mulheres/2022";

const MALE_15_50: [&str; 5] = [
    "Sexo masculino, 15 a 19 anos",
    "Sexo masculino, 20 a 24 anos",
    "Sexo masculino, 25 a 29 anos",
    "Sexo masculino, 30 a 39 anos",
    "Sexo masculino, 40 a 49 anos",
];
const FEMALE_15_50: [&str; 5] = [
    "Sexo feminino, 15 a 19 anos",
    "Sexo feminino, 20 a 24 anos",
    "Sexo feminino, 25 a 29 anos",
    "Sexo feminino, 30 a 39 anos",
    "Sexo feminino, 40 a 49 anos",
];

const SALARY: &str = "valor médio";

const ROBBERY_NEIGHBORHOOD: &str = "Bairros";
const ROBBERY_MEAN: &str = "Média";

const USAGE: &str = "uso";
const PROPERTY_VALUE: &str = "média_valor_imóvel";

/// Usage category of non-residential property rows.
pub const NON_RESIDENTIAL: &str = "NAO RESIDENCIAL";

/// Signature shared by the six slide preparation routines.
pub type PrepareFn = fn(&RawTables, &AllowList, &NeighborhoodPalette) -> Result<Chart, DataError>;

// ---------------------------------------------------------------------------
// Ordering helpers
// ---------------------------------------------------------------------------

fn sort_descending(rows: &mut [ChartRow]) {
    rows.sort_by(|a, b| b.measure.total().total_cmp(&a.measure.total()));
}

fn sort_ascending(rows: &mut [ChartRow]) {
    rows.sort_by(|a, b| a.measure.total().total_cmp(&b.measure.total()));
}

fn row(
    palette: &NeighborhoodPalette,
    neighborhood: &str,
    measure: Measure,
) -> Result<ChartRow, DataError> {
    Ok(ChartRow {
        neighborhood: neighborhood.to_string(),
        measure,
        color: palette.color_for(neighborhood)?,
    })
}

/// Sum the given columns of one row.
fn row_sum(table: &Table, row: usize, columns: &[usize]) -> Result<f64, DataError> {
    columns.iter().map(|&c| table.number(row, c)).sum()
}

fn column_indices(table: &Table, columns: &[&str]) -> Result<Vec<usize>, DataError> {
    columns.iter().map(|c| table.column_index(c)).collect()
}

/// Single-column view over an allow-listed table, in table order.
fn single_value_rows(
    table: &Table,
    name_column: &str,
    value_column: &str,
    allow: &AllowList,
    palette: &NeighborhoodPalette,
) -> Result<Vec<ChartRow>, DataError> {
    let value = table.column_index(value_column)?;
    allowed_rows(table, name_column, allow)?
        .into_iter()
        .map(|(i, name)| row(palette, name, Measure::Single(table.number(i, value)?)))
        .collect()
}

// ---------------------------------------------------------------------------
// Slide 1 & 2 – population 2022
// ---------------------------------------------------------------------------

/// Male/female population per neighborhood, largest total first.
fn population_rows(
    tables: &RawTables,
    allow: &AllowList,
    palette: &NeighborhoodPalette,
) -> Result<Vec<ChartRow>, DataError> {
    let table = &tables.population;
    let male = table.column_index(MALE_2022)?;
    let female = table.column_index(FEMALE_2022)?;

    let mut rows = allowed_rows(table, NEIGHBORHOOD, allow)?
        .into_iter()
        .map(|(i, name)| {
            let measure = Measure::BySex {
                male: table.number(i, male)?,
                female: table.number(i, female)?,
            };
            row(palette, name, measure)
        })
        .collect::<Result<Vec<_>, _>>()?;
    sort_descending(&mut rows);
    Ok(rows)
}

/// Total population (male + female), descending.
pub fn total_population(
    tables: &RawTables,
    allow: &AllowList,
    palette: &NeighborhoodPalette,
) -> Result<Chart, DataError> {
    let rows = population_rows(tables, allow, palette)?
        .into_iter()
        .map(|r| ChartRow {
            measure: Measure::Single(r.measure.total()),
            ..r
        })
        .collect();
    Ok(Chart { rows })
}

/// Male and female population side by side, in the order of [`total_population`].
pub fn population_by_sex(
    tables: &RawTables,
    allow: &AllowList,
    palette: &NeighborhoodPalette,
) -> Result<Chart, DataError> {
    Ok(Chart {
        rows: population_rows(tables, allow, palette)?,
    })
}

// ---------------------------------------------------------------------------
// Slide 3 – population aged 15 to 50
// ---------------------------------------------------------------------------

/// Per-sex sum of the five 15–49 age brackets, ascending by total.
pub fn population_15_50_by_sex(
    tables: &RawTables,
    allow: &AllowList,
    palette: &NeighborhoodPalette,
) -> Result<Chart, DataError> {
    let table = &tables.age_brackets;
    let male = column_indices(table, &MALE_15_50)?;
    let female = column_indices(table, &FEMALE_15_50)?;

    let mut rows = allowed_rows(table, NEIGHBORHOOD, allow)?
        .into_iter()
        .map(|(i, name)| {
            let measure = Measure::BySex {
                male: row_sum(table, i, &male)?,
                female: row_sum(table, i, &female)?,
            };
            row(palette, name, measure)
        })
        .collect::<Result<Vec<_>, _>>()?;
    sort_ascending(&mut rows);
    Ok(Chart { rows })
}

// ---------------------------------------------------------------------------
// Slide 4 – average salary
// ---------------------------------------------------------------------------

pub fn average_salary(
    tables: &RawTables,
    allow: &AllowList,
    palette: &NeighborhoodPalette,
) -> Result<Chart, DataError> {
    let mut rows = single_value_rows(&tables.salary, NEIGHBORHOOD, SALARY, allow, palette)?;
    sort_descending(&mut rows);
    Ok(Chart { rows })
}

// ---------------------------------------------------------------------------
// Slide 5 – average robbery count
// ---------------------------------------------------------------------------

/// Robbery averages in the order the source file lists them.
pub fn average_robbery(
    tables: &RawTables,
    allow: &AllowList,
    palette: &NeighborhoodPalette,
) -> Result<Chart, DataError> {
    let rows = single_value_rows(
        &tables.robbery,
        ROBBERY_NEIGHBORHOOD,
        ROBBERY_MEAN,
        allow,
        palette,
    )?;
    Ok(Chart { rows })
}

// ---------------------------------------------------------------------------
// Slide 6 – non-residential property value
// ---------------------------------------------------------------------------

/// Mean non-residential property value per neighborhood, ascending.
///
/// Neighborhood names in the property file carry stray padding, so they are
/// trimmed before matching and grouping.
pub fn average_property_value(
    tables: &RawTables,
    allow: &AllowList,
    palette: &NeighborhoodPalette,
) -> Result<Chart, DataError> {
    let table = &tables.property;
    let name_col = table.column_index(NEIGHBORHOOD)?;
    let usage = table.column_index(USAGE)?;
    let value = table.column_index(PROPERTY_VALUE)?;

    // name → (sum, count); BTreeMap so groups are visited in name order
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for i in 0..table.len() {
        if table.text(i, usage) != Some(NON_RESIDENTIAL) {
            continue;
        }
        let Some(name) = table.text(i, name_col).map(str::trim) else {
            continue;
        };
        if !allow.contains(name) {
            continue;
        }
        let v = table.number(i, value)?;
        let entry = groups.entry(name).or_insert((0.0, 0));
        entry.0 += v;
        entry.1 += 1;
    }

    let mut rows = groups
        .into_iter()
        .map(|(name, (sum, count))| row(palette, name, Measure::Single(sum / count as f64)))
        .collect::<Result<Vec<_>, _>>()?;
    sort_ascending(&mut rows);
    Ok(Chart { rows })
}
