use std::collections::BTreeSet;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use sbmltools_core::conversion::compartment_mapper::{
    build_compartment_translation, CompartmentTranslation,
};
use sbmltools_core::document::ParsedCompartment;

#[pyclass(name = "CompartmentTranslation")]
struct PyCompartmentTranslation {
    inner: CompartmentTranslation,
}

#[pymethods]
impl PyCompartmentTranslation {
    /// Build from `(external_id, display_name)` pairs in declaration order
    #[new]
    fn new(compartments: Vec<(String, String)>) -> PyResult<Self> {
        let parsed: Vec<ParsedCompartment> = compartments
            .iter()
            .map(|(id, name)| ParsedCompartment::new(id, name))
            .collect();
        match build_compartment_translation(&parsed, None) {
            Ok(inner) => Ok(PyCompartmentTranslation { inner }),
            Err(err) => Err(PyValueError::new_err(err.to_string())),
        }
    }

    fn to_internal(&self, external_id: &str) -> Option<String> {
        self.inner.to_internal(external_id).map(str::to_string)
    }

    fn to_external(&self, internal_id: &str) -> Option<String> {
        self.inner.to_external(internal_id).map(str::to_string)
    }

    fn internal_ids(&self) -> Vec<String> {
        self.inner.internal_ids().map(str::to_string).collect()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }
}

/// Set of genes referenced by a gene association string
#[pyfunction]
#[pyo3(signature = (gpr=None))]
fn extract_genes(gpr: Option<&str>) -> BTreeSet<String> {
    sbmltools_core::io::gpr_parse::extract_genes(gpr, None)
}

#[pyfunction]
fn model_id_from_url(url: &str) -> Option<String> {
    sbmltools_core::importer::model_id_from_url(url)
}

#[pyfunction]
fn parse_biomass_identifiers(text: &str) -> BTreeSet<String> {
    sbmltools_core::configuration::parse_biomass_identifiers(text)
}

/// A Python module implemented in Rust. The name of this function must match
/// the `lib.name` setting in the `Cargo.toml`, else Python will not be able to
/// import the module.
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(extract_genes, m)?)?;
    m.add_function(wrap_pyfunction!(model_id_from_url, m)?)?;
    m.add_function(wrap_pyfunction!(parse_biomass_identifiers, m)?)?;
    m.add_class::<PyCompartmentTranslation>()?;
    Ok(())
}
