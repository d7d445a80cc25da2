use panoptes::{instruction::Instruction, value::IrValue};

use super::{IrIndex, QueryError, SourceSite};

impl<'module> IrIndex<'module> {
    /// The lines of the listing where `value` is consumed, in use-list order.
    /// Works for instructions, blocks (used by branches) and functions (used
    /// by calls) alike.
    ///
    /// # Errors
    /// [`QueryError::UnknownValue`] when `value` is not indexed;
    /// [`QueryError::UserNotAnInstruction`] or [`QueryError::UnindexedUser`]
    /// when a use site cannot be resolved to an indexed instruction.
    pub fn uses(&self, value: IrValue<'module>) -> Result<Vec<usize>, QueryError> {
        if !self.entries.contains_key(&value) {
            return Err(QueryError::UnknownValue);
        }

        let mut lines = Vec::new();

        for user in value.uses() {
            let Some(IrValue::Instruction(instruction)) = user.classify() else {
                return Err(QueryError::UserNotAnInstruction);
            };

            let location = self
                .entries
                .get(&IrValue::Instruction(instruction))
                .ok_or(QueryError::UnindexedUser)?;

            lines.push(location.line());
        }

        Ok(lines)
    }

    /// The sites introducing the operands of `instruction` that are
    /// themselves instructions or blocks. Other operand kinds (arguments,
    /// globals, constants) have no defining line in the listing and are
    /// skipped.
    ///
    /// # Errors
    /// [`QueryError::UnknownValue`] when the instruction is not indexed;
    /// [`QueryError::UnindexedOperand`] when an instruction or block operand
    /// is missing from the index.
    pub fn defining_sites(
        &self,
        instruction: Instruction<'module>,
    ) -> Result<Vec<SourceSite<'_>>, QueryError> {
        if !self.entries.contains_key(&IrValue::Instruction(instruction)) {
            return Err(QueryError::UnknownValue);
        }

        let mut sites = Vec::new();

        for operand in instruction.operands() {
            let Some(value) = operand.classify() else {
                continue;
            };

            match value {
                IrValue::Instruction(_) | IrValue::Block(_) => {
                    let location = self
                        .entries
                        .get(&value)
                        .ok_or(QueryError::UnindexedOperand)?;

                    sites.push(self.site(*location));
                }
                IrValue::Function(_) => {}
            }
        }

        Ok(sites)
    }

    /// The sites of the blocks a phi can arrive from, in declaration order.
    ///
    /// # Errors
    /// [`QueryError::NotAPhi`] when the instruction is no phi;
    /// [`QueryError::UnknownValue`] when it is not indexed;
    /// [`QueryError::UnindexedPredecessor`] when an incoming block is missing
    /// from the index.
    pub fn predecessors(
        &self,
        instruction: Instruction<'module>,
    ) -> Result<Vec<SourceSite<'_>>, QueryError> {
        if !self.entries.contains_key(&IrValue::Instruction(instruction)) {
            return Err(QueryError::UnknownValue);
        }

        let phi = instruction.as_phi().ok_or(QueryError::NotAPhi)?;

        let mut sites = Vec::new();

        for (_, block) in phi.incoming() {
            let location = self
                .entries
                .get(&IrValue::Block(block))
                .ok_or(QueryError::UnindexedPredecessor)?;

            sites.push(self.site(*location));
        }

        Ok(sites)
    }
}
