//! Common RDF vocabularies and namespaces

use crate::model::NamedNode;
use std::sync::LazyLock;

/// RDF vocabulary namespace
pub mod rdf {
    use super::*;

    /// The RDF namespace IRI
    pub const NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    /// rdf:type predicate
    pub static TYPE: LazyLock<NamedNode> =
        LazyLock::new(|| NamedNode::new_unchecked(format!("{}type", NAMESPACE)));

    /// rdf:Property class
    pub static PROPERTY: LazyLock<NamedNode> =
        LazyLock::new(|| NamedNode::new_unchecked(format!("{}Property", NAMESPACE)));

    /// rdf:List class
    pub static LIST: LazyLock<NamedNode> =
        LazyLock::new(|| NamedNode::new_unchecked(format!("{}List", NAMESPACE)));

    /// rdf:first predicate
    pub static FIRST: LazyLock<NamedNode> =
        LazyLock::new(|| NamedNode::new_unchecked(format!("{}first", NAMESPACE)));

    /// rdf:rest predicate
    pub static REST: LazyLock<NamedNode> =
        LazyLock::new(|| NamedNode::new_unchecked(format!("{}rest", NAMESPACE)));

    /// rdf:nil resource
    pub static NIL: LazyLock<NamedNode> =
        LazyLock::new(|| NamedNode::new_unchecked(format!("{}nil", NAMESPACE)));

    /// rdf:langString datatype
    pub static LANG_STRING: LazyLock<NamedNode> =
        LazyLock::new(|| NamedNode::new_unchecked(format!("{}langString", NAMESPACE)));
}

/// XML Schema datatypes vocabulary namespace
pub mod xsd {
    use super::*;

    /// The XSD namespace IRI
    pub const NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

    /// xsd:string datatype
    pub static STRING: LazyLock<NamedNode> =
        LazyLock::new(|| NamedNode::new_unchecked(format!("{}string", NAMESPACE)));

    /// xsd:boolean datatype
    pub static BOOLEAN: LazyLock<NamedNode> =
        LazyLock::new(|| NamedNode::new_unchecked(format!("{}boolean", NAMESPACE)));

    /// xsd:integer datatype
    pub static INTEGER: LazyLock<NamedNode> =
        LazyLock::new(|| NamedNode::new_unchecked(format!("{}integer", NAMESPACE)));

    /// xsd:decimal datatype
    pub static DECIMAL: LazyLock<NamedNode> =
        LazyLock::new(|| NamedNode::new_unchecked(format!("{}decimal", NAMESPACE)));

    /// xsd:double datatype
    pub static DOUBLE: LazyLock<NamedNode> =
        LazyLock::new(|| NamedNode::new_unchecked(format!("{}double", NAMESPACE)));
}

/// RDFS vocabulary namespace
pub mod rdfs {
    use super::*;

    /// The RDFS namespace IRI
    pub const NAMESPACE: &str = "http://www.w3.org/2000/01/rdf-schema#";

    /// rdfs:Class class
    pub static CLASS: LazyLock<NamedNode> =
        LazyLock::new(|| NamedNode::new_unchecked(format!("{}Class", NAMESPACE)));

    /// rdfs:label predicate
    pub static LABEL: LazyLock<NamedNode> =
        LazyLock::new(|| NamedNode::new_unchecked(format!("{}label", NAMESPACE)));

    /// rdfs:comment predicate
    pub static COMMENT: LazyLock<NamedNode> =
        LazyLock::new(|| NamedNode::new_unchecked(format!("{}comment", NAMESPACE)));
}

/// Dublin Core elements vocabulary namespace
pub mod dc {
    use super::*;

    /// The DC elements namespace IRI
    pub const NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";

    /// dc:title predicate
    pub static TITLE: LazyLock<NamedNode> =
        LazyLock::new(|| NamedNode::new_unchecked(format!("{}title", NAMESPACE)));

    /// dc:description predicate
    pub static DESCRIPTION: LazyLock<NamedNode> =
        LazyLock::new(|| NamedNode::new_unchecked(format!("{}description", NAMESPACE)));
}
