use std::ffi::CStr;

use panoptes::{
    ffi,
    module::Module,
    value::{IrValue, Value as _},
};

const PROGRAM: &str = r"
define i64 @sum(i64 %a, i64 %b) {
entry:
  %total = add i64 %a, %b
  br label %exit

exit:
  %result = phi i64 [ %total, %entry ]
  ret i64 %result
}
";

#[test]
fn names_follow_the_listing() {
    let module = Module::parse_ir("values", PROGRAM).unwrap();
    let function = module.get_function("sum").unwrap();

    assert_eq!("sum", function.name());

    let entry = function.first_block().unwrap();
    assert_eq!("entry", entry.name());

    let total = entry.first_instruction().unwrap();
    assert_eq!("total", total.name());

    // The branch produces no value, so it carries no name.
    let branch = total.next().unwrap();
    assert_eq!("", branch.name());
}

#[test]
fn repeated_name_reads_return_the_same_text() {
    let module = Module::parse_ir("values", PROGRAM).unwrap();
    let total = module
        .get_function("sum")
        .unwrap()
        .first_block()
        .unwrap()
        .first_instruction()
        .unwrap();

    assert_eq!(total.name(), total.name());
}

#[test]
fn exported_get_name_matches_the_safe_accessor() {
    let module = Module::parse_ir("values", PROGRAM).unwrap();
    let total = module
        .get_function("sum")
        .unwrap()
        .first_block()
        .unwrap()
        .first_instruction()
        .unwrap();

    // SAFETY: the handle comes from a live module owned by this test
    let name = unsafe { CStr::from_ptr(ffi::get_name(total.as_llvm_ref())) };
    assert_eq!("total", name.to_str().unwrap());

    // SAFETY: as above; the value is unchanged, so the text must match
    let again = unsafe { CStr::from_ptr(ffi::get_name(total.as_llvm_ref())) };
    assert_eq!(name, again);
}

#[test]
fn use_chains_lead_to_the_users() {
    let module = Module::parse_ir("values", PROGRAM).unwrap();
    let function = module.get_function("sum").unwrap();
    let entry = function.first_block().unwrap();
    let total = entry.first_instruction().unwrap();

    // %total is consumed exactly once, by the phi in %exit.
    let users: Vec<_> = total.uses().collect();
    assert_eq!(1, users.len());

    let Some(IrValue::Instruction(phi)) = users[0].classify() else {
        panic!("the user of %total should be an instruction");
    };
    assert_eq!("result", phi.name());
}

#[test]
fn blocks_are_used_by_their_branches() {
    let module = Module::parse_ir("values", PROGRAM).unwrap();
    let function = module.get_function("sum").unwrap();
    let exit = function.first_block().unwrap().next().unwrap();

    let users: Vec<_> = exit.uses().collect();
    assert_eq!(1, users.len());

    let Some(IrValue::Instruction(branch)) = users[0].classify() else {
        panic!("the user of %exit should be the branch");
    };
    assert_eq!("", branch.name());
}

#[test]
fn phi_incoming_pairs_name_their_blocks() {
    let module = Module::parse_ir("values", PROGRAM).unwrap();
    let function = module.get_function("sum").unwrap();
    let exit = function.first_block().unwrap().next().unwrap();
    let phi = exit.first_instruction().unwrap();

    let incoming: Vec<_> = phi.as_phi().unwrap().incoming().collect();

    assert_eq!(1, incoming.len());
    assert_eq!("total", incoming[0].0.name());
    assert_eq!("entry", incoming[0].1.name());

    // The terminator is no phi.
    assert!(phi.next().unwrap().as_phi().is_none());
}

#[test]
fn operands_of_a_branch_include_its_target_block() {
    let module = Module::parse_ir("values", PROGRAM).unwrap();
    let function = module.get_function("sum").unwrap();
    let entry = function.first_block().unwrap();
    let branch = entry.first_instruction().unwrap().next().unwrap();

    let operands: Vec<_> = branch.operands().collect();
    assert_eq!(1, operands.len());

    let Some(IrValue::Block(target)) = operands[0].classify() else {
        panic!("the operand of the branch should be a block");
    };
    assert_eq!("exit", target.name());
}
