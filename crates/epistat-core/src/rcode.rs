//! R reference snippets for reproducing a calculation.
//!
//! Pure string formatting: nothing here is executed or parsed, and the
//! numeric code paths never depend on it.

use crate::calculators::{CalculatorInput, RatioInput};
use crate::distribution::NORMAL_APPROX_DF;

/// R code reproducing the calculation described by `input`.
pub fn generate(input: &CalculatorInput) -> String {
    match input {
        CalculatorInput::ChiSquare(i) => {
            let correct = if i.yates_or_default() { "TRUE" } else { "FALSE" };
            format!(
                "{}\nchisq.test(tab, correct = {correct})\n",
                table_literal(i.a, i.b, i.c, i.d)
            )
        }
        CalculatorInput::OddsRatio(i) => format!(
            "{}{}\
             or <- (tab[1, 1] * tab[2, 2]) / (tab[1, 2] * tab[2, 1])\n\
             se <- sqrt(sum(1 / tab))\n\
             or\n\
             exp(log(or) + c(-1, 1) * z * se)\n",
            table_literal(i.a, i.b, i.c, i.d),
            z_literal(i),
        ),
        CalculatorInput::RiskRatio(i) => format!(
            "{}{}\
             risk <- tab[, 1] / rowSums(tab)\n\
             rr <- risk[1] / risk[2]\n\
             se <- sqrt(1 / tab[1, 1] - 1 / sum(tab[1, ]) + 1 / tab[2, 1] - 1 / sum(tab[2, ]))\n\
             rr\n\
             exp(log(rr) + c(-1, 1) * z * se)\n",
            table_literal(i.a, i.b, i.c, i.d),
            z_literal(i),
        ),
        CalculatorInput::Epi2x2(i) => format!(
            "{}{}\
             adj <- tab + 0.5\n\
             point <- if (any(tab == 0)) adj else tab\n\
             or <- (point[1, 1] * point[2, 2]) / (point[1, 2] * point[2, 1])\n\
             or\n\
             # Woolf interval, always on corrected counts\n\
             se_woolf <- sqrt(sum(1 / adj))\n\
             or_adj <- (adj[1, 1] * adj[2, 2]) / (adj[1, 2] * adj[2, 1])\n\
             exp(log(or_adj) + c(-1, 1) * z * se_woolf)\n\
             # Exact-like interval\n\
             exp(log(or) + c(-1, 1) * z * sqrt(sum(1 / point)))\n\
             risk <- point[, 1] / rowSums(point)\n\
             rr <- risk[1] / risk[2]\n\
             rr\n\
             se_rr <- sqrt(1 / point[1, 1] - 1 / sum(point[1, ]) + 1 / point[2, 1] - 1 / sum(point[2, ]))\n\
             exp(log(rr) + c(-1, 1) * z * se_rr)\n\
             # Risk difference with a Wald interval, uncorrected counts\n\
             p <- tab[, 1] / rowSums(tab)\n\
             rd <- p[1] - p[2]\n\
             rd\n\
             rd + c(-1, 1) * z * sqrt(sum(p * (1 - p) / rowSums(tab)))\n\
             # Association p-value on the log-OR scale\n\
             2 * pt(-abs(log(or)) / se_woolf, df = {})\n",
            table_literal(i.a, i.b, i.c, i.d),
            z_literal(i),
            NORMAL_APPROX_DF,
        ),
    }
}

fn table_literal(a: f64, b: f64, c: f64, d: f64) -> String {
    format!(
        "tab <- matrix(c({a}, {b}, {c}, {d}), nrow = 2, byrow = TRUE,\n              \
         dimnames = list(Exposure = c(\"Exposed\", \"Unexposed\"), \
         Outcome = c(\"Cases\", \"Non-cases\")))"
    )
}

fn z_literal(input: &RatioInput) -> String {
    format!(
        "\nz <- qnorm(1 - (1 - {} / 100) / 2)\n",
        input.confidence_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::ChiSquareInput;
    use crate::registry::CalculatorId;
    use crate::table::ContingencyTable;

    #[test]
    fn chi_square_snippet() {
        let code = generate(&CalculatorInput::ChiSquare(ChiSquareInput {
            a: 10.0,
            b: 20.0,
            c: 30.0,
            d: 40.0,
            yates: Some(false),
        }));
        assert!(code.contains("matrix(c(10, 20, 30, 40)"));
        assert!(code.contains("chisq.test(tab, correct = FALSE)"));
    }

    #[test]
    fn ratio_snippets_carry_confidence() {
        let table = ContingencyTable::new(70.0, 30.0, 40.0, 60.0);
        for id in [CalculatorId::OddsRatio, CalculatorId::RiskRatio, CalculatorId::Epi2x2] {
            let code = generate(&CalculatorInput::from_table(id, table, None, Some(99.0)));
            assert!(code.contains("qnorm(1 - (1 - 99 / 100) / 2)"), "{id}: {code}");
        }
    }

    #[test]
    fn epi_snippet_mentions_correction() {
        let table = ContingencyTable::new(0.0, 10.0, 5.0, 5.0);
        let code = generate(&CalculatorInput::from_table(CalculatorId::Epi2x2, table, None, None));
        assert!(code.contains("adj <- tab + 0.5"));
        assert!(code.contains("point <- if (any(tab == 0)) adj else tab"));
        assert!(code.contains("df = 1000"));
    }

    #[test]
    fn epi_woolf_line_is_corrected_without_zero_cells() {
        let table = ContingencyTable::new(70.0, 30.0, 40.0, 60.0);
        let code = generate(&CalculatorInput::from_table(CalculatorId::Epi2x2, table, None, None));
        // The Woolf interval must use the corrected table even with no zero cell
        assert!(code.contains("adj <- tab + 0.5"));
        assert!(code.contains("se_woolf <- sqrt(sum(1 / adj))"));
        assert!(code.contains("exp(log(or_adj) + c(-1, 1) * z * se_woolf)"));
        assert!(code.contains("exp(log(or) + c(-1, 1) * z * sqrt(sum(1 / point)))"));
        assert!(!code.contains("if (any(tab == 0)) tab <-"));
    }

    #[test]
    fn epi_risk_difference_is_wald() {
        let table = ContingencyTable::new(70.0, 30.0, 40.0, 60.0);
        let code = generate(&CalculatorInput::from_table(CalculatorId::Epi2x2, table, None, None));
        assert!(code.contains("rd + c(-1, 1) * z * sqrt(sum(p * (1 - p) / rowSums(tab)))"));
        assert!(!code.contains("prop.test"));
    }
}
