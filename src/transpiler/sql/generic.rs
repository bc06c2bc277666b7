use crate::config::TranslatorOptions;
use crate::transpiler::traits::SqlTranslator;

/// The baseline: every translator default, identifiers left bare.
#[derive(Debug, Clone, Default)]
pub struct GenericTranslator {
    options: TranslatorOptions,
}

impl GenericTranslator {
    pub fn new(options: TranslatorOptions) -> Self {
        Self { options }
    }
}

impl SqlTranslator for GenericTranslator {
    fn name(&self) -> &'static str {
        "Generic"
    }

    fn options(&self) -> &TranslatorOptions {
        &self.options
    }
}
