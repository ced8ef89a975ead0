//! Waveguide-crossing networks that bring distant qubits together.
//!
//! A two-qubit coupler can only be placed on neighbouring rail pairs. When
//! the operands of a CNOT are further apart, a ladder of crossings walks the
//! lower qubit's rails up the line, two positions per step. Applying the
//! same ladder a second time undoes it, so one block serves both as the
//! forward network and as the restoring network after the gate body.

use klm_ir::QubitId;
use tracing::debug;

use crate::component::{Block, ComponentInstance};
use crate::error::{CompileError, CompileResult};

/// Build the crossing ladder between `low` and `upper`.
///
/// `low` must not be above `upper` on the line; callers normalize the pair
/// first (see [`crate::layout::normalized`]). Returns an empty block when
/// the qubits are at most one position apart. Otherwise the block holds the
/// crossings followed by a single blank separator line.
pub fn swap_network(low: QubitId, upper: QubitId) -> CompileResult<Block> {
    if low > upper {
        return Err(CompileError::MalformedSwapInput {
            low: low.position(),
            upper: upper.position(),
        });
    }

    let mut block = Block::new();
    if low.distance(upper) <= 1 {
        return Ok(block);
    }

    let mut low = u64::from(low.position());
    let upper = u64::from(upper.position());
    let mut steps = 0_usize;

    while 2 * low + 3 <= upper + 1 {
        let i = 2 * low;
        let o = 2 * low + 1;
        let i1 = 2 * low + 2;
        let o1 = 2 * low + 3;

        block.push(ComponentInstance::crossing(i1, o));
        block.push(ComponentInstance::crossing(o, i));
        block.push(ComponentInstance::crossing(o1, i1));
        block.push(ComponentInstance::crossing(i1, o));

        low += 2;
        steps += 1;
    }

    debug!(steps, upper, "Built swap network");
    block.push_blank();
    Ok(block)
}
