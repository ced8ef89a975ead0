//! KLM lowering of H, X and CNOT.

use klm_ir::QubitId;

use crate::component::{Block, ComponentInstance, Port};
use crate::error::CompileResult;
use crate::layout::{RailPair, normalized};
use crate::protocol::ProtocolLowering;
use crate::swap::swap_network;

/// Gate lowering for the KLM protocol.
#[derive(Debug, Clone, Copy, Default)]
pub struct KlmLowering;

impl ProtocolLowering for KlmLowering {
    fn name(&self) -> &str {
        "klm"
    }

    /// A single 50/50 directional coupler on the qubit's own rails.
    fn hadamard(&self, qubit: QubitId) -> Block {
        let rails = RailPair::of(qubit);
        [ComponentInstance::coupler(
            rails.output_port(),
            rails.input_port(),
        )]
        .into_iter()
        .collect()
    }

    /// A bit flip is a crossing of the qubit's two rails.
    fn pauli_x(&self, qubit: QubitId) -> Block {
        let rails = RailPair::of(qubit);
        [ComponentInstance::crossing(rails.output, rails.input)]
            .into_iter()
            .collect()
    }

    /// Outer 50/50 couplers on the target, three 67/33 couplers in between.
    ///
    /// Non-adjacent operands are wrapped in the same crossing network before
    /// and after the couplers.
    fn cnot(&self, control: QubitId, target: QubitId) -> CompileResult<Block> {
        let routing = if control.distance(target) > 1 {
            let (low, upper) = normalized(control, target);
            swap_network(low, upper)?
        } else {
            Block::new()
        };

        let c = RailPair::of(control);
        let t = RailPair::of(target);

        let mut block = Block::new();
        block.extend(&routing);

        block.push(ComponentInstance::coupler(t.output_port(), t.input_port()));
        block.push(ComponentInstance::coupler(Port::Open, c.output_port()));
        block.push(ComponentInstance::coupler(c.input_port(), c.below_input()));
        block.push(ComponentInstance::coupler(t.input_port(), Port::Open));
        block.push(ComponentInstance::coupler(t.output_port(), t.input_port()));

        block.extend(&routing);
        Ok(block)
    }
}
