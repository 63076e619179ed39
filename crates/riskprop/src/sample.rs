//! Built-in sample supply chain.
//!
//! Five organizations, seven products, seven software components and five
//! vulnerabilities, used when no graph file is configured and as a shared
//! fixture in tests.

use crate::domain::{Edge, GraphData, Node, NodeType, Relation};

const NODES: &[(&str, NodeType, &str, u8)] = &[
    ("org_mtl", NodeType::Organization, "City of Montreal", 45),
    ("org_micrologic", NodeType::Organization, "Micrologic", 72),
    ("org_techcorp", NodeType::Organization, "TechCorp Solutions", 38),
    ("org_dataflow", NodeType::Organization, "DataFlow Inc", 55),
    ("org_cloudserve", NodeType::Organization, "CloudServe", 68),
    ("product_veeam", NodeType::Product, "Veeam Cloud Connect", 65),
    ("product_openshift", NodeType::Product, "OpenShift Platform", 42),
    ("product_jenkins", NodeType::Product, "Jenkins CI/CD", 58),
    ("product_splunk", NodeType::Product, "Splunk Enterprise", 35),
    ("product_docker", NodeType::Product, "Docker Enterprise", 48),
    ("product_k8s", NodeType::Product, "Kubernetes", 52),
    ("product_postgres", NodeType::Product, "PostgreSQL", 30),
    ("software_log4j", NodeType::Software, "Log4j", 85),
    ("software_nginx", NodeType::Software, "nginx", 40),
    ("software_openssl", NodeType::Software, "OpenSSL", 62),
    ("software_redis", NodeType::Software, "Redis", 45),
    ("software_spring", NodeType::Software, "Spring Framework", 55),
    ("software_jackson", NodeType::Software, "Jackson", 48),
    ("software_tomcat", NodeType::Software, "Apache Tomcat", 50),
    ("vuln_cve2021_44228", NodeType::Vulnerability, "CVE-2021-44228 (Log4Shell)", 95),
    ("vuln_cve2024_1234", NodeType::Vulnerability, "CVE-2024-1234", 78),
    ("vuln_cve2024_5678", NodeType::Vulnerability, "CVE-2024-5678", 82),
    ("vuln_cve2025_9999", NodeType::Vulnerability, "CVE-2025-9999", 88),
    ("vuln_cve2024_3333", NodeType::Vulnerability, "CVE-2024-3333", 70),
];

const EDGES: &[(&str, &str, Relation, f64)] = &[
    // organization -> organization
    ("org_mtl", "org_micrologic", Relation::SuppliesTo, 0.95),
    ("org_mtl", "org_techcorp", Relation::SuppliesTo, 0.88),
    ("org_micrologic", "org_cloudserve", Relation::SuppliesTo, 0.82),
    ("org_techcorp", "org_dataflow", Relation::SuppliesTo, 0.90),
    // organization -> product
    ("org_micrologic", "product_veeam", Relation::Uses, 0.92),
    ("org_micrologic", "product_jenkins", Relation::Uses, 0.87),
    ("org_techcorp", "product_openshift", Relation::Uses, 0.90),
    ("org_techcorp", "product_docker", Relation::Uses, 0.85),
    ("org_dataflow", "product_splunk", Relation::Uses, 0.88),
    ("org_cloudserve", "product_k8s", Relation::Uses, 0.93),
    ("org_cloudserve", "product_postgres", Relation::Uses, 0.89),
    // product -> software
    ("product_veeam", "software_log4j", Relation::DependsOn, 0.85),
    ("product_veeam", "software_openssl", Relation::DependsOn, 0.90),
    ("product_jenkins", "software_log4j", Relation::DependsOn, 0.88),
    ("product_openshift", "software_nginx", Relation::DependsOn, 0.92),
    ("product_openshift", "software_redis", Relation::DependsOn, 0.87),
    ("product_docker", "software_openssl", Relation::DependsOn, 0.91),
    ("product_splunk", "software_spring", Relation::DependsOn, 0.86),
    ("product_k8s", "software_nginx", Relation::DependsOn, 0.89),
    ("product_postgres", "software_openssl", Relation::DependsOn, 0.93),
    ("product_jenkins", "software_tomcat", Relation::DependsOn, 0.84),
    // software -> vulnerability
    ("software_log4j", "vuln_cve2021_44228", Relation::AffectedBy, 1.0),
    ("software_openssl", "vuln_cve2024_1234", Relation::AffectedBy, 0.95),
    ("software_nginx", "vuln_cve2024_5678", Relation::AffectedBy, 0.92),
    ("software_spring", "vuln_cve2025_9999", Relation::AffectedBy, 0.97),
    ("software_tomcat", "vuln_cve2024_3333", Relation::AffectedBy, 0.89),
];

/// The sample supply-chain graph.
#[must_use]
pub fn sample_graph() -> GraphData {
    let nodes = NODES
        .iter()
        .map(|&(id, node_type, name, risk)| Node::new(id, node_type, name, risk))
        .collect();
    let edges = EDGES
        .iter()
        .map(|&(source, target, relation, confidence)| {
            Edge::new(source, target, relation).with_confidence(confidence)
        })
        .collect();
    GraphData::new(nodes, edges)
}
