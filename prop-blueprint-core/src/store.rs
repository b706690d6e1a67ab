use tracing::{debug, warn};

use crate::error::{BlueprintError, Result};
use crate::models::BlueprintParameter;
use crate::resolve::{KeyIndex, NameNormalizer, Resolver, lowercase_name};

/// Ordered parameter list plus the semantic-key index computed at ingest.
///
/// Edits replace a value in place; names and order never change after
/// ingest, which keeps the index valid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterStore {
    params: Vec<BlueprintParameter>,
    index: KeyIndex,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parameters(params: Vec<BlueprintParameter>) -> Self {
        Self::from_parameters_with(params, &lowercase_name)
    }

    pub fn from_parameters_with(
        params: Vec<BlueprintParameter>,
        normalizer: &dyn NameNormalizer,
    ) -> Self {
        if !params.is_empty() && !(3..=5).contains(&params.len()) {
            warn!(count = params.len(), "analysis supplied an unusual number of parameters");
        }
        let index = KeyIndex::build(&params, normalizer);
        debug!(count = params.len(), "parameter store populated");
        ParameterStore { params, index }
    }

    /// Replace the value of the parameter at `index`.
    pub fn update(&mut self, index: usize, value: f64) -> Result<()> {
        let len = self.params.len();
        let p = self
            .params
            .get_mut(index)
            .ok_or(BlueprintError::ParameterIndex { index, len })?;
        debug!(index, name = %p.name, old = p.value, new = value, "parameter edited");
        p.value = value;
        Ok(())
    }

    pub fn as_slice(&self) -> &[BlueprintParameter] {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.params, &self.index)
    }
}
