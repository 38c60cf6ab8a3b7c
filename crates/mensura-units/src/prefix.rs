//! SI and binary prefixes.

/// A multiplicative prefix such as `kilo`/`k`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prefix {
    /// Full name, combined with unit names (`kilometer`).
    pub name: &'static str,
    /// Symbol, combined with unit symbols (`km`).
    pub symbol: &'static str,
    /// Scale factor.
    pub factor: f64,
}

const fn prefix(name: &'static str, symbol: &'static str, factor: f64) -> Prefix {
    Prefix {
        name,
        symbol,
        factor,
    }
}

/// Every known prefix. Lookups try longer names first, see [`split_prefixed_name`].
pub const PREFIXES: &[Prefix] = &[
    prefix("quetta", "Q", 1e30),
    prefix("ronna", "R", 1e27),
    prefix("yotta", "Y", 1e24),
    prefix("zetta", "Z", 1e21),
    prefix("exa", "E", 1e18),
    prefix("peta", "P", 1e15),
    prefix("tera", "T", 1e12),
    prefix("giga", "G", 1e9),
    prefix("mega", "M", 1e6),
    prefix("kilo", "k", 1e3),
    prefix("hecto", "h", 1e2),
    prefix("deca", "da", 1e1),
    prefix("deka", "da", 1e1),
    prefix("deci", "d", 1e-1),
    prefix("centi", "c", 1e-2),
    prefix("milli", "m", 1e-3),
    prefix("micro", "µ", 1e-6),
    prefix("micro", "u", 1e-6),
    prefix("nano", "n", 1e-9),
    prefix("pico", "p", 1e-12),
    prefix("femto", "f", 1e-15),
    prefix("atto", "a", 1e-18),
    prefix("zepto", "z", 1e-21),
    prefix("yocto", "y", 1e-24),
    prefix("ronto", "r", 1e-27),
    prefix("quecto", "q", 1e-30),
    prefix("kibi", "Ki", 1_024.0),
    prefix("mebi", "Mi", 1_048_576.0),
    prefix("gibi", "Gi", 1_073_741_824.0),
    prefix("tebi", "Ti", 1_099_511_627_776.0),
    prefix("pebi", "Pi", 1_125_899_906_842_624.0),
    prefix("exbi", "Ei", 1_152_921_504_606_846_976.0),
];

/// Splits `kilometer` into (`kilo`, `meter`) candidates.
///
/// Returns every prefix whose name starts `input` together with the
/// remainder, so the caller can try each remainder against the unit table.
pub fn split_prefixed_name(input: &str) -> impl Iterator<Item = (&'static Prefix, &str)> {
    PREFIXES.iter().filter_map(move |p| {
        input
            .strip_prefix(p.name)
            .filter(|rest| !rest.is_empty())
            .map(|rest| (p, rest))
    })
}

/// Splits `km` into (`k`, `m`) candidates. Same contract as [`split_prefixed_name`].
pub fn split_prefixed_symbol(input: &str) -> impl Iterator<Item = (&'static Prefix, &str)> {
    PREFIXES.iter().filter_map(move |p| {
        input
            .strip_prefix(p.symbol)
            .filter(|rest| !rest.is_empty())
            .map(|rest| (p, rest))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_name() {
        let candidates: Vec<_> = split_prefixed_name("kilometer").collect();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].0.factor, 1e3);
        assert_eq!(candidates[0].1, "meter");
    }

    #[test]
    fn test_split_symbol_is_case_sensitive() {
        let mega: Vec<_> = split_prefixed_symbol("Mm").map(|(p, _)| p.name).collect();
        assert_eq!(mega, vec!["mega"]);

        let milli: Vec<_> = split_prefixed_symbol("mm").map(|(p, _)| p.name).collect();
        assert_eq!(milli, vec!["milli"]);
    }

    #[test]
    fn test_split_symbol_yields_all_candidates() {
        let names: Vec<_> = split_prefixed_symbol("dam").map(|(p, rest)| (p.name, rest)).collect();
        assert!(names.contains(&("deca", "m")));
        assert!(names.contains(&("deci", "am")));
    }

    #[test]
    fn test_bare_prefix_is_not_a_unit() {
        assert_eq!(split_prefixed_name("kilo").count(), 0);
        assert_eq!(split_prefixed_symbol("k").count(), 0);
    }
}
