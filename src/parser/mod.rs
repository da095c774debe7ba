pub mod crosslink;
pub mod extract;
pub mod nodes;
pub mod sections;

// Pipeline shape: rendered HTML → nodes::parse_fragment → per-document
// extractors (sections / jobs / projects / skills) → crosslink::build_index.
// Every stage is a single deterministic pass that tolerates malformed input
// by emitting fewer records, never an error.
