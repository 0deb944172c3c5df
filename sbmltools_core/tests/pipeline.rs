use std::collections::BTreeSet;

use indexmap::IndexMap;
use rstest::rstest;
use sbmltools_core::configuration::Configuration;
use sbmltools_core::conversion::{
    build_compartment_translation, convert, ConversionError, ModelConverter, ReferenceTable,
};
use sbmltools_core::document::{
    ParsedCompartment, ParsedReaction, ParsedSpecies, SbmlDocument, SpeciesReference,
};
use sbmltools_core::importer::SbmlImporter;
use sbmltools_core::io::gpr_parse::extract_genes;
use sbmltools_core::validation::{validate, MessageKind, Severity, ValidationSchema};

fn species(id: &str, compartment: &str) -> ParsedSpecies {
    ParsedSpecies {
        external_id: id.to_string(),
        compartment_external_id: compartment.to_string(),
        ..Default::default()
    }
}

/// A small glycolysis fragment with one broken gene association and one biomass reaction
fn glycolysis() -> SbmlDocument {
    SbmlDocument {
        model_id: Some("glycolysis".to_string()),
        source_url: Some("https://example.org/models/glycolysis.xml".to_string()),
        compartments: vec![
            ParsedCompartment::new("c0", ""),
            ParsedCompartment::new("e0", "Extracellular"),
        ],
        species: vec![
            species("glc__D_e", "e0"),
            species("glc__D_c", "c0"),
            species("g6p_c", "c0"),
            species("atp_c", "c0"),
            species("adp_c", "c0"),
        ],
        reactions: vec![
            ParsedReaction {
                external_id: "GLCt".to_string(),
                reactants: vec![SpeciesReference::new("glc__D_e", None)],
                products: vec![SpeciesReference::new("glc__D_c", None)],
                gene_association: Some("\"b2417 and b1101\"".to_string()),
                ..Default::default()
            },
            ParsedReaction {
                external_id: "HEX1".to_string(),
                reactants: vec![
                    SpeciesReference::new("glc__D_c", Some("1")),
                    SpeciesReference::new("atp_c", Some("1")),
                ],
                products: vec![
                    SpeciesReference::new("g6p_c", Some("1")),
                    SpeciesReference::new("adp_c", Some("1")),
                ],
                gene_association: Some("b2388;b0001 and (b0002|b0003".to_string()),
                ..Default::default()
            },
            ParsedReaction {
                external_id: "BIOMASS".to_string(),
                reactants: vec![
                    SpeciesReference::new("g6p_c", Some("0.205")),
                    SpeciesReference::new("atp_c", Some("59.81")),
                ],
                products: vec![SpeciesReference::new("adp_c", Some("59.81"))],
                ..Default::default()
            },
        ],
    }
}

#[rstest]
#[case(None, &[])]
#[case(Some(""), &[])]
#[case(Some("g1 and g2"), &["g1", "g2"])]
#[case(Some("123"), &[])]
#[case(Some("g1;g2|g3"), &["g1", "g2", "g3"])]
#[case(Some("N/A"), &["unknown"])]
#[case(Some("\"\"(b0001 or b0002)\"\""), &["b0001", "b0002"])]
fn gene_extraction_is_total(#[case] gpr: Option<&str>, #[case] expected: &[&str]) {
    let expected: BTreeSet<String> = expected.iter().map(|g| g.to_string()).collect();
    assert_eq!(extract_genes(gpr, None), expected);
}

#[test]
fn end_to_end_conversion() {
    let document = glycolysis();
    let configuration = Configuration::default().with_biomass_identifiers(["BIOMASS"]);
    let (model, report) = ModelConverter::new(&configuration)
        .run(&document, &ValidationSchema::default())
        .unwrap();

    assert_eq!(model.id, "glycolysis");
    let internal: Vec<&str> = model.compartments.keys().map(String::as_str).collect();
    assert_eq!(internal, vec!["a0", "b0"]);
    assert_eq!(model.compounds["glc__D_e"].compartment_ref, "b0");
    assert_eq!(model.compounds["glc__D_c"].name, "undefined");

    let hex = &model.reactions["HEX1"];
    assert_eq!(
        hex.gene_set.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["b0003", "b2388"]
    );
    let glct = &model.reactions["GLCt"];
    assert_eq!(glct.gene_set.len(), 2);

    assert_eq!(model.biomass_ids(), vec!["BIOMASS"]);
    assert_eq!(model.reactions.len(), 3);
    assert_eq!(report.biomass()["BIOMASS"].len(), 3);

    assert_eq!(report.species_count(), 5);
    assert_eq!(report.reaction_count(), 3);
    assert_eq!(report.gene_count(), 4);
    assert_eq!(report.count(Severity::Warn), 1);
    let malformed = &report.messages()[0];
    assert_eq!(malformed.kind, MessageKind::MalformedExpression);
    assert_eq!(malformed.context, "HEX1: b0001 and (b0002");
}

#[test]
fn sign_invariant_and_compartment_bijection() {
    let document = glycolysis();
    let translation = build_compartment_translation(&document.compartments, None).unwrap();
    let (model, _) = convert(&document, &translation, &Configuration::default()).unwrap();

    for compartment in &document.compartments {
        assert!(translation.to_internal(&compartment.external_id).is_some());
    }
    assert_eq!(translation.len(), document.compartments.len());
    for compound in model.compounds.values() {
        assert!(translation.contains_internal(&compound.compartment_ref));
    }

    for reaction in model.reactions.values() {
        let reactants: BTreeSet<&str> =
            reaction.reactants().map(|r| r.compound_ref.as_str()).collect();
        let products: BTreeSet<&str> =
            reaction.products().map(|r| r.compound_ref.as_str()).collect();
        for only_reactant in reactants.difference(&products) {
            assert!(reaction.net_coefficient(only_reactant) < 0.0);
        }
        for only_product in products.difference(&reactants) {
            assert!(reaction.net_coefficient(only_product) > 0.0);
        }
    }
}

#[test]
fn conversion_is_idempotent() {
    let document = glycolysis();
    let configuration = Configuration::default().with_biomass_identifiers(["BIOMASS"]);
    let table = ReferenceTable(IndexMap::from([("atp_c".to_string(), "cpd00002".to_string())]));
    let converter = ModelConverter::new(&configuration).with_reference_lookup(&table);
    let first = converter.run(&document, &ValidationSchema::default()).unwrap();
    let second = converter.run(&document, &ValidationSchema::default()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.1.resolved_references(), 1);
}

#[test]
fn eight_compartments_abort_the_run() {
    let mut document = glycolysis();
    document.compartments = (0..8)
        .map(|i| ParsedCompartment::new(&format!("c{}", i), ""))
        .collect();
    let configuration = Configuration::default();
    match ModelConverter::new(&configuration).run(&document, &ValidationSchema::default()) {
        Err(ConversionError::CompartmentCapacityExceeded { required, capacity }) => {
            assert_eq!(required, 8);
            assert_eq!(capacity, 7);
        }
        other => panic!("Expected capacity error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn validation_leaves_the_document_alone() {
    let mut document = glycolysis();
    document.species.push(species("x_c", ""));
    let before = document.clone();
    let messages = validate(&document, &ValidationSchema::default());
    assert_eq!(document, before);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].severity, Severity::Warn);
    assert_eq!(messages[0].field, "compartment");
    assert_eq!(messages[0].context, "x_c");
}

#[test]
fn importer_summarizes_the_run() {
    let configuration = Configuration::default().with_biomass_identifiers(["BIOMASS"]);
    let result = SbmlImporter::new(&configuration).import(&[glycolysis()], None);
    assert_eq!(
        result.message(),
        "Species 5, Reactions 3, https://example.org/models/glycolysis.xml\n\
         glycolysis WARN: 1\n\
         glycolysis biomass: [\"BIOMASS\"]"
    );
}
