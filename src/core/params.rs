use crate::error::{FxError, FxResult};
use fnv::FnvHashMap;
use serde::Deserialize;
use smallvec::SmallVec;

/// A single parameter value. Numbers cover sizes, speeds and durations;
/// text covers colors and easing names; flags cover on/off options.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Flag(bool),
    Text(String),
}

impl ParamValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ParamValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    fn same_kind(&self, other: &ParamValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    fn kind_name(&self) -> &'static str {
        match self {
            ParamValue::Number(_) => "a number",
            ParamValue::Flag(_) => "a boolean",
            ParamValue::Text(_) => "a string",
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Number(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Flag(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

/// Compile-time default for a schema slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamDefault {
    Number(f64),
    Flag(bool),
    Text(&'static str),
}

impl ParamDefault {
    pub fn to_value(self) -> ParamValue {
        match self {
            ParamDefault::Number(n) => ParamValue::Number(n),
            ParamDefault::Flag(b) => ParamValue::Flag(b),
            ParamDefault::Text(s) => ParamValue::Text(s.to_string()),
        }
    }
}

/// One recognized parameter of a renderer.
#[derive(Clone, Copy, Debug)]
pub struct ParamSpec {
    pub name: &'static str,
    pub default: ParamDefault,
}

/// A full assignment of a schema, stored in schema order.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterSet(SmallVec<[ParamValue; 8]>);

impl ParameterSet {
    fn defaults(schema: &[ParamSpec]) -> Self {
        ParameterSet(schema.iter().map(|s| s.default.to_value()).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Named parameter bag with atomically swappable presets ("modes").
///
/// Only names in the renderer's schema may be set. Every slot always holds a
/// value of the kind its default declares, so reads never fail.
#[derive(Clone, Debug)]
pub struct ParameterStore {
    schema: &'static [ParamSpec],
    base: ParameterSet,
    current: ParameterSet,
    modes: FnvHashMap<String, ParameterSet>,
    active_mode: Option<String>,
}

impl ParameterStore {
    pub fn new(schema: &'static [ParamSpec]) -> Self {
        let base = ParameterSet::defaults(schema);
        Self {
            schema,
            current: base.clone(),
            base,
            modes: FnvHashMap::default(),
            active_mode: None,
        }
    }

    /// Build a store from defaults overridden by `values`. The result becomes
    /// the base that partial mode presets are completed from.
    pub fn with_values<'n, I>(schema: &'static [ParamSpec], values: I) -> FxResult<Self>
    where
        I: IntoIterator<Item = (&'n str, ParamValue)>,
    {
        let mut store = Self::new(schema);
        for (name, value) in values {
            store.set(name, value)?;
        }
        store.base = store.current.clone();
        Ok(store)
    }

    pub fn schema(&self) -> &'static [ParamSpec] {
        self.schema
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.schema.iter().position(|s| s.name == name)
    }

    /// Validate `value` for slot `name` and return the slot index.
    fn check(&self, name: &str, value: &ParamValue) -> FxResult<usize> {
        let idx = self
            .index_of(name)
            .ok_or_else(|| FxError::UnrecognizedParameter(name.to_string()))?;
        let expected = &self.base.0[idx];
        if !expected.same_kind(value) {
            return Err(FxError::InvalidValue {
                name: name.to_string(),
                expected: expected.kind_name(),
            });
        }
        Ok(idx)
    }

    /// Set one slot. Unknown names and kind mismatches leave the store untouched.
    pub fn set(&mut self, name: &str, value: ParamValue) -> FxResult<()> {
        let idx = self.check(name, &value).map_err(|e| {
            log::warn!("[params] {}", e);
            e
        })?;
        self.current.0[idx] = value;
        self.active_mode = None;
        Ok(())
    }

    /// Register a preset. Slots the preset does not mention take the base
    /// value, so every registered mode is a complete set.
    pub fn register_mode<'n, I>(&mut self, name: impl Into<String>, values: I) -> FxResult<()>
    where
        I: IntoIterator<Item = (&'n str, ParamValue)>,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(FxError::InvalidConfiguration("mode name is empty".into()));
        }
        let mut set = self.base.clone();
        for (param, value) in values {
            let idx = self.check(param, &value)?;
            set.0[idx] = value;
        }
        log::debug!("[params] registered mode `{}`", name);
        self.modes.insert(name, set);
        Ok(())
    }

    /// Replace every slot with the preset's values in a single assignment.
    pub fn apply_mode(&mut self, name: &str) -> FxResult<()> {
        let Some(preset) = self.modes.get(name) else {
            let e = FxError::UnknownMode(name.to_string());
            log::warn!("[params] {}", e);
            return Err(e);
        };
        self.current = preset.clone();
        self.active_mode = Some(name.to_string());
        Ok(())
    }

    pub fn active_mode(&self) -> Option<&str> {
        self.active_mode.as_deref()
    }

    pub fn mode(&self, name: &str) -> Option<&ParameterSet> {
        self.modes.get(name)
    }

    pub fn mode_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.modes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.index_of(name).map(|i| &self.current.0[i])
    }

    pub fn number(&self, name: &str) -> f64 {
        self.get(name).and_then(ParamValue::as_number).unwrap_or(0.0)
    }

    pub fn text(&self, name: &str) -> &str {
        self.get(name).and_then(ParamValue::as_text).unwrap_or("")
    }

    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(ParamValue::as_flag).unwrap_or(false)
    }

    pub fn snapshot(&self) -> ParameterSet {
        self.current.clone()
    }

    /// Names whose value differs from `before`.
    pub fn changed_since(&self, before: &ParameterSet) -> Vec<&'static str> {
        self.schema
            .iter()
            .zip(self.current.0.iter().zip(before.0.iter()))
            .filter(|(_, (now, then))| now != then)
            .map(|(spec, _)| spec.name)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ParamValue)> + '_ {
        self.schema
            .iter()
            .map(|s| s.name)
            .zip(self.current.0.iter())
    }
}
