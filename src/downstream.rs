//! Interface-only seams for collaborators that stay out of scope: the
//! SOAP/RPC transport, transcript/genome mapping, GenBank retrieval, batch
//! scheduling, cache synchronization, and the variant "checker" that
//! evaluates a parsed tree against a reference sequence.
//!
//! Modeled the way `data/interface.rs`'s `Provider` trait documents a
//! collaborator contract without implementing it: this module declares what
//! a consumer of [`crate::ast::Var`] receives, nothing more.

use crate::ast::Var;

/// Something that consumes a completed parse tree: the position converter,
/// the semantic checker, or a describer. None of these are implemented in
/// this crate; this trait exists only to document the seam.
pub trait ParseTreeConsumer {
    /// Hands a successfully parsed variant to the consumer. The tree is
    /// immutable and owned by the caller for the duration of the call.
    fn consume(&mut self, variant: &Var);
}
