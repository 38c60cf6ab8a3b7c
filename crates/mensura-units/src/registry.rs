//! The unit registry: name resolution over a table of [`UnitDef`]s.

use std::collections::HashMap;

use tracing::debug;

use crate::definitions::DEFAULT_UNITS;
use crate::parse::parse_expression;
use crate::prefix::{split_prefixed_name, split_prefixed_symbol};
use crate::{Unit, UnitDef, UnitError, UnitResult};

/// A capability to enumerate, parse and convert units.
///
/// Implemented by [`UnitRegistry`]; callers that only need conversion
/// depend on this trait so the registry can be swapped out.
pub trait UnitSystem: Send + Sync {
    /// Every defined unit name, in registry form (`nautical_mile`).
    fn unit_names(&self) -> Vec<String>;

    /// Resolves a unit expression such as `kilometer/hour`.
    fn parse_unit(&self, expression: &str) -> UnitResult<Unit>;

    /// Converts `value` between two unit expressions.
    fn convert(&self, value: f64, from: &str, to: &str) -> UnitResult<f64> {
        let from = self.parse_unit(from)?;
        let to = self.parse_unit(to)?;
        from.convert_to(value, &to)
    }
}

/// Registry of unit definitions.
///
/// # Example
///
/// ```
/// use mensura_units::{UnitRegistry, UnitSystem};
///
/// let registry = UnitRegistry::new().unwrap();
/// let cm = registry.convert(1.0, "meter", "centimeter").unwrap();
/// assert_eq!(cm, 100.0);
/// ```
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    definitions: Vec<UnitDef>,
    /// Names and aliases to definition index.
    names: HashMap<&'static str, usize>,
    /// Symbols to definition index.
    symbols: HashMap<&'static str, usize>,
}

impl UnitRegistry {
    /// Builds the registry from the built-in unit table.
    pub fn new() -> UnitResult<Self> {
        Self::with_definitions(DEFAULT_UNITS.iter().copied())
    }

    /// Builds a registry from custom definitions.
    ///
    /// Fails if two definitions share a name, alias or symbol.
    pub fn with_definitions(definitions: impl IntoIterator<Item = UnitDef>) -> UnitResult<Self> {
        let definitions: Vec<UnitDef> = definitions.into_iter().collect();
        let mut names = HashMap::new();
        let mut symbols = HashMap::new();

        for (index, def) in definitions.iter().enumerate() {
            for key in std::iter::once(def.name).chain(def.aliases.iter().copied()) {
                if names.insert(key, index).is_some() {
                    return Err(UnitError::DuplicateDefinition { key: key.to_string() });
                }
            }
            if let Some(symbol) = def.symbol {
                if symbols.insert(symbol, index).is_some() {
                    return Err(UnitError::DuplicateDefinition {
                        key: symbol.to_string(),
                    });
                }
            }
        }

        debug!(
            units = definitions.len(),
            names = names.len(),
            symbols = symbols.len(),
            "Unit registry built"
        );

        Ok(Self {
            definitions,
            names,
            symbols,
        })
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` when the registry has no definitions.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Every definition, in table order.
    pub fn definitions(&self) -> &[UnitDef] {
        &self.definitions
    }

    /// Resolves a single unit name (no operators).
    ///
    /// Tries, in order: exact name, alias or symbol; a prefixed name or symbol
    /// (`centimeter`, `km`); the same two steps after dropping a plural `s`.
    pub fn resolve(&self, name: &str) -> UnitResult<Unit> {
        self.resolve_singular(name)
            .or_else(|| {
                name.strip_suffix('s')
                    .filter(|stem| !stem.is_empty())
                    .and_then(|stem| self.resolve_singular(stem))
            })
            .ok_or_else(|| UnitError::undefined(name))
    }

    fn resolve_singular(&self, name: &str) -> Option<Unit> {
        if let Some(&index) = self.names.get(name).or_else(|| self.symbols.get(name)) {
            let def = &self.definitions[index];
            return Some(Unit::from_def(def, 1.0, def.name.to_string()));
        }

        for (prefix, rest) in split_prefixed_name(name) {
            if let Some(def) = self.prefixable(self.names.get(rest)) {
                return Some(Unit::from_def(
                    def,
                    prefix.factor,
                    format!("{}{}", prefix.name, def.name),
                ));
            }
        }

        for (prefix, rest) in split_prefixed_symbol(name) {
            if let Some(def) = self.prefixable(self.symbols.get(rest)) {
                return Some(Unit::from_def(
                    def,
                    prefix.factor,
                    format!("{}{}", prefix.name, def.name),
                ));
            }
        }

        None
    }

    fn prefixable(&self, index: Option<&usize>) -> Option<&UnitDef> {
        index
            .map(|&i| &self.definitions[i])
            .filter(|def| def.prefixable)
    }
}

impl UnitSystem for UnitRegistry {
    fn unit_names(&self) -> Vec<String> {
        self.definitions.iter().map(|d| d.name.to_string()).collect()
    }

    fn parse_unit(&self, expression: &str) -> UnitResult<Unit> {
        parse_expression(expression, |name| self.resolve(name))
    }
}
