use crate::data::prepare::{self, PrepareFn};

// ---------------------------------------------------------------------------
// Slide table
// ---------------------------------------------------------------------------

/// Direction the bars grow in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// How bar values are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// `210.000`
    Count,
    /// `R$ 3.900`
    Currency,
    /// `96`
    Plain,
}

impl ValueFormat {
    /// Round to the nearest integer (ties to even) and format for display.
    pub fn label(self, value: f64) -> String {
        match self {
            ValueFormat::Count => group_thousands(value),
            ValueFormat::Currency => format!("R$ {}", group_thousands(value)),
            ValueFormat::Plain => format!("{}", value.round_ties_even() as i64),
        }
    }
}

/// `1234567.4` → `1.234.567`
fn group_thousands(value: f64) -> String {
    let rounded = value.round_ties_even() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// One slide: data source plus presentation.
pub struct ViewSpec {
    pub figure: &'static str,
    pub title: &'static str,
    pub orientation: Orientation,
    pub format: ValueFormat,
    pub value_axis: &'static str,
    /// Legend names for two-series slides (male, female).
    pub series: Option<[&'static str; 2]>,
    pub prepare: PrepareFn,
}

pub const CATEGORY_AXIS: &str = "Bairros";

/// Number of slides.
pub const VIEW_COUNT: usize = 6;

/// The slides, in presentation order.
pub static VIEWS: [ViewSpec; VIEW_COUNT] = [
    ViewSpec {
        figure: "Figura 1",
        title: "População Total por Bairro - IBGE 2022",
        orientation: Orientation::Vertical,
        format: ValueFormat::Count,
        value_axis: "População Total",
        series: None,
        prepare: prepare::total_population,
    },
    ViewSpec {
        figure: "Figura 2",
        title: "Homens e Mulheres por Bairro - IBGE 2022",
        orientation: Orientation::Vertical,
        format: ValueFormat::Count,
        value_axis: "População",
        series: Some(["Homens", "Mulheres"]),
        prepare: prepare::population_by_sex,
    },
    ViewSpec {
        figure: "Figura 3",
        title: "Homens e Mulheres entre 15 e 50 anos por Bairro - IBGE 2022",
        orientation: Orientation::Horizontal,
        format: ValueFormat::Count,
        value_axis: "População 15-50 anos",
        series: Some(["Homens 15-50 anos", "Mulheres 15-50 anos"]),
        prepare: prepare::population_15_50_by_sex,
    },
    ViewSpec {
        figure: "Figura 4",
        title: "Salário Médio Mensal por Bairro - Data Rio 2022",
        orientation: Orientation::Vertical,
        format: ValueFormat::Currency,
        value_axis: "Salário Médio (R$)",
        series: None,
        prepare: prepare::average_salary,
    },
    ViewSpec {
        figure: "Figura 5",
        title: "Média de Roubos por bairro - Jornal O Globo 2024",
        orientation: Orientation::Horizontal,
        format: ValueFormat::Plain,
        value_axis: "Média de Roubos",
        series: None,
        prepare: prepare::average_robbery,
    },
    ViewSpec {
        figure: "Figura 6",
        title: "Média de valores de Imóveis Não Residenciais - Data Rio 2022",
        orientation: Orientation::Horizontal,
        format: ValueFormat::Currency,
        value_axis: "Média de valores de Imóveis Não Residenciais (R$)",
        series: None,
        prepare: prepare::average_property_value,
    },
];

/// Category-axis coordinate of row `index`.
///
/// Rows sit on consecutive integer slots. Vertical charts read left to right;
/// horizontal charts read bottom to top, so the last row of an ascending
/// chart ends up on top.
pub fn slot(index: usize) -> f64 {
    index as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::prepare::tests::{defaults, fixture_tables};

    #[test]
    fn test_orientation_table() {
        let orientations: Vec<Orientation> = VIEWS.iter().map(|v| v.orientation).collect();
        use Orientation::*;
        assert_eq!(
            orientations,
            vec![Vertical, Vertical, Horizontal, Vertical, Horizontal, Horizontal]
        );
        assert_eq!(VIEW_COUNT, 6);
    }

    #[test]
    fn test_two_series_views() {
        let two: Vec<usize> = (0..VIEW_COUNT).filter(|&i| VIEWS[i].series.is_some()).collect();
        assert_eq!(two, vec![1, 2]);
    }

    #[test]
    fn test_labels_round_and_group() {
        assert_eq!(ValueFormat::Count.label(210_000.0), "210.000");
        assert_eq!(ValueFormat::Count.label(1_234_567.4), "1.234.567");
        assert_eq!(ValueFormat::Count.label(999.6), "1.000");
        assert_eq!(ValueFormat::Currency.label(3_899.7), "R$ 3.900");
        assert_eq!(ValueFormat::Currency.label(150.0), "R$ 150");
        assert_eq!(ValueFormat::Plain.label(95.4), "95");
        assert_eq!(ValueFormat::Count.label(-1_500.0), "-1.500");
    }

    #[test]
    fn test_labels_round_half_to_even() {
        assert_eq!(ValueFormat::Plain.label(96.5), "96");
        assert_eq!(ValueFormat::Plain.label(95.5), "96");
        assert_eq!(ValueFormat::Count.label(1_234.5), "1.234");
        assert_eq!(ValueFormat::Count.label(1_235.5), "1.236");
        assert_eq!(ValueFormat::Currency.label(3_500.5), "R$ 3.500");
    }

    #[test]
    fn test_every_view_prepares_fixture() {
        let (allow, palette) = defaults();
        let tables = fixture_tables();
        let counts: Vec<usize> = VIEWS
            .iter()
            .map(|v| (v.prepare)(&tables, &allow, &palette).unwrap().len())
            .collect();
        assert_eq!(counts, vec![3, 3, 3, 3, 3, 2]);
    }
}
