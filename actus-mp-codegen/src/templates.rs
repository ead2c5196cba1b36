//! Template registry per target language

use std::collections::BTreeMap;
use std::path::Path;

use handlebars::{
    Context, Handlebars, Helper, HelperResult, Output, RenderContext, RenderError,
    RenderErrorReason,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::convertor::{to_camel_case, to_pascal_case, to_snake_case};
use crate::enums::{GeneratorKind, TargetLanguage};
use crate::CodegenError;

/// Compiled templates, one registry per language, built once per run
pub struct TemplateCache {
    registries: BTreeMap<TargetLanguage, Handlebars<'static>>,
}

impl TemplateCache {
    /// Templates compiled into the binary
    pub fn embedded(languages: &[TargetLanguage]) -> Result<Self, CodegenError> {
        Self::build(languages, |language, kind| {
            Ok(Some(embedded_source(language, kind).to_string()))
        })
    }

    /// Templates read from `<dir>/<py|rs|ts>/<py|rs|ts>_<kind>.hbs`.
    ///
    /// The directory must provide every template of each requested language.
    pub fn from_dir(dir: &Path, languages: &[TargetLanguage]) -> Result<Self, CodegenError> {
        info!("Loading templates from {}", dir.display());
        Self::build(languages, |language, kind| {
            let path = dir
                .join(language.template_folder())
                .join(format!("{}.hbs", template_key(language, kind)));
            if !path.is_file() {
                return Ok(None);
            }
            std::fs::read_to_string(&path)
                .map(Some)
                .map_err(|source| CodegenError::Io { path, source })
        })
    }

    fn build<F>(languages: &[TargetLanguage], source: F) -> Result<Self, CodegenError>
    where
        F: Fn(TargetLanguage, GeneratorKind) -> Result<Option<String>, CodegenError>,
    {
        let mut registries = BTreeMap::new();

        for &language in languages {
            let mut registry = Handlebars::new();
            registry.set_strict_mode(true);
            registry.register_escape_fn(handlebars::no_escape);
            registry.register_helper("snake_case", Box::new(snake_case_helper));
            registry.register_helper("camel_case", Box::new(camel_case_helper));
            registry.register_helper("pascal_case", Box::new(pascal_case_helper));
            registry.register_helper("lower", Box::new(lower_helper));
            registry.register_helper("upper", Box::new(upper_helper));

            for kind in GeneratorKind::ALL {
                let name = template_key(language, kind);
                let template = source(language, kind)?.ok_or_else(|| {
                    CodegenError::MissingTemplate {
                        language,
                        name: name.clone(),
                    }
                })?;
                registry
                    .register_template_string(&name, template)
                    .map_err(|e| CodegenError::Template {
                        name: name.clone(),
                        source: Box::new(e),
                    })?;
                debug!(template = %name, "Registered template");
            }

            registries.insert(language, registry);
        }

        Ok(Self { registries })
    }

    pub fn languages(&self) -> impl Iterator<Item = TargetLanguage> + '_ {
        self.registries.keys().copied()
    }

    pub fn render<T: Serialize>(
        &self,
        language: TargetLanguage,
        kind: GeneratorKind,
        data: &T,
    ) -> Result<String, CodegenError> {
        let name = template_key(language, kind);
        let registry = self
            .registries
            .get(&language)
            .ok_or_else(|| CodegenError::MissingTemplate {
                language,
                name: name.clone(),
            })?;
        registry.render(&name, data).map_err(|e| CodegenError::Render {
            name,
            source: Box::new(e),
        })
    }
}

/// Registry name and file stem of a template, e.g. `rs_term_set`
fn template_key(language: TargetLanguage, kind: GeneratorKind) -> String {
    format!("{}_{}", language.template_folder(), kind.template_name())
}

fn embedded_source(language: TargetLanguage, kind: GeneratorKind) -> &'static str {
    use GeneratorKind as K;
    use TargetLanguage as L;

    match (language, kind) {
        (L::Python, K::Enum) => include_str!("../templates/py/py_enum.hbs"),
        (L::Python, K::EnumIndex) => include_str!("../templates/py/py_enum_index.hbs"),
        (L::Python, K::FuncIndex) => include_str!("../templates/py/py_func_index.hbs"),
        (L::Python, K::PayoffStub) => include_str!("../templates/py/py_payoff_stub.hbs"),
        (L::Python, K::StateTransitionStub) => include_str!("../templates/py/py_state_transition_stub.hbs"),
        (L::Python, K::AlgorithmStubIndex) => include_str!("../templates/py/py_algorithm_stub_index.hbs"),
        (L::Python, K::ScheduleStub) => include_str!("../templates/py/py_schedule_stub.hbs"),
        (L::Python, K::ExecuteStepStub) => include_str!("../templates/py/py_execute_step_stub.hbs"),
        (L::Python, K::StateSpace) => include_str!("../templates/py/py_state_space.hbs"),
        (L::Python, K::TermSet) => include_str!("../templates/py/py_term_set.hbs"),
        (L::Python, K::TermSetIndex) => include_str!("../templates/py/py_term_set_index.hbs"),
        (L::Rust, K::Enum) => include_str!("../templates/rs/rs_enum.hbs"),
        (L::Rust, K::EnumIndex) => include_str!("../templates/rs/rs_enum_index.hbs"),
        (L::Rust, K::FuncIndex) => include_str!("../templates/rs/rs_func_index.hbs"),
        (L::Rust, K::PayoffStub) => include_str!("../templates/rs/rs_payoff_stub.hbs"),
        (L::Rust, K::StateTransitionStub) => include_str!("../templates/rs/rs_state_transition_stub.hbs"),
        (L::Rust, K::AlgorithmStubIndex) => include_str!("../templates/rs/rs_algorithm_stub_index.hbs"),
        (L::Rust, K::ScheduleStub) => include_str!("../templates/rs/rs_schedule_stub.hbs"),
        (L::Rust, K::ExecuteStepStub) => include_str!("../templates/rs/rs_execute_step_stub.hbs"),
        (L::Rust, K::StateSpace) => include_str!("../templates/rs/rs_state_space.hbs"),
        (L::Rust, K::TermSet) => include_str!("../templates/rs/rs_term_set.hbs"),
        (L::Rust, K::TermSetIndex) => include_str!("../templates/rs/rs_term_set_index.hbs"),
        (L::TypeScript, K::Enum) => include_str!("../templates/ts/ts_enum.hbs"),
        (L::TypeScript, K::EnumIndex) => include_str!("../templates/ts/ts_enum_index.hbs"),
        (L::TypeScript, K::FuncIndex) => include_str!("../templates/ts/ts_func_index.hbs"),
        (L::TypeScript, K::PayoffStub) => include_str!("../templates/ts/ts_payoff_stub.hbs"),
        (L::TypeScript, K::StateTransitionStub) => include_str!("../templates/ts/ts_state_transition_stub.hbs"),
        (L::TypeScript, K::AlgorithmStubIndex) => include_str!("../templates/ts/ts_algorithm_stub_index.hbs"),
        (L::TypeScript, K::ScheduleStub) => include_str!("../templates/ts/ts_schedule_stub.hbs"),
        (L::TypeScript, K::ExecuteStepStub) => include_str!("../templates/ts/ts_execute_step_stub.hbs"),
        (L::TypeScript, K::StateSpace) => include_str!("../templates/ts/ts_state_space.hbs"),
        (L::TypeScript, K::TermSet) => include_str!("../templates/ts/ts_term_set.hbs"),
        (L::TypeScript, K::TermSetIndex) => include_str!("../templates/ts/ts_term_set_index.hbs"),
    }
}

// Handlebars helpers

fn string_param<'a>(h: &'a Helper, helper: &'static str) -> Result<&'a str, RenderError> {
    let param = h
        .param(0)
        .ok_or(RenderErrorReason::ParamNotFoundForIndex(helper, 0))?;
    param
        .value()
        .as_str()
        .ok_or_else(|| RenderErrorReason::InvalidParamType("string").into())
}

fn snake_case_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    out.write(&to_snake_case(string_param(h, "snake_case")?))?;
    Ok(())
}

fn camel_case_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    out.write(&to_camel_case(string_param(h, "camel_case")?, "_"))?;
    Ok(())
}

fn pascal_case_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    out.write(&to_pascal_case(string_param(h, "pascal_case")?, "_"))?;
    Ok(())
}

fn lower_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    out.write(&string_param(h, "lower")?.to_lowercase())?;
    Ok(())
}

fn upper_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    out.write(&string_param(h, "upper")?.to_uppercase())?;
    Ok(())
}
