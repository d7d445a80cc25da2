use argus_inspector_lib::{
    index::{IrIndex, QueryError},
    source::SourceText,
};
use panoptes::{module::Module, value::IrValue};

const PROGRAM: &str = "\
define i64 @sum(i64 %a, i64 %b) {
entry:
  %total = add i64 %a, %b
  br label %exit

exit:
  %result = phi i64 [ %total, %entry ]
  ret i64 %result
}

define i64 @main() {
entry:
  %value = call i64 @sum(i64 1, i64 2)
  ret i64 %value
}
";

fn fixture() -> (Module, SourceText) {
    let module = Module::parse_ir("queries", PROGRAM).unwrap();
    let source = SourceText::new(PROGRAM);

    (module, source)
}

#[test]
fn instruction_uses_report_the_users_lines() {
    let (module, source) = fixture();
    let index = IrIndex::build(&module, &source).unwrap();

    let entry = module.get_function("sum").unwrap().first_block().unwrap();
    let total = entry.first_instruction().unwrap();

    // %total feeds the phi on line 7.
    assert_eq!(vec![7], index.uses(IrValue::Instruction(total)).unwrap());
}

#[test]
fn block_uses_come_from_branches() {
    let (module, source) = fixture();
    let index = IrIndex::build(&module, &source).unwrap();

    let entry = module.get_function("sum").unwrap().first_block().unwrap();
    let exit = entry.next().unwrap();

    assert_eq!(vec![4], index.uses(IrValue::Block(exit)).unwrap());

    // Nothing branches to the entry block, and a phi's incoming block list
    // adds no use edges.
    assert!(index.uses(IrValue::Block(entry)).unwrap().is_empty());
}

#[test]
fn function_uses_come_from_calls() {
    let (module, source) = fixture();
    let index = IrIndex::build(&module, &source).unwrap();

    let sum = module.get_function("sum").unwrap();

    assert_eq!(vec![13], index.uses(IrValue::Function(sum)).unwrap());
}

#[test]
fn defining_sites_cover_instruction_and_block_operands() {
    let (module, source) = fixture();
    let index = IrIndex::build(&module, &source).unwrap();

    let entry = module.get_function("sum").unwrap().first_block().unwrap();
    let total = entry.first_instruction().unwrap();
    let branch = total.next().unwrap();
    let exit = entry.next().unwrap();
    let phi = exit.first_instruction().unwrap();

    // The phi consumes %total, defined on line 3.
    let sites: Vec<_> = index
        .defining_sites(phi)
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(vec!["3, total"], sites);

    // The branch targets the %exit block, introduced on line 6.
    let sites: Vec<_> = index
        .defining_sites(branch)
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(vec!["6, exit"], sites);

    // %total only consumes arguments, which have no line of their own.
    assert!(index.defining_sites(total).unwrap().is_empty());
}

#[test]
fn call_operands_skip_constants_and_callees() {
    let (module, source) = fixture();
    let index = IrIndex::build(&module, &source).unwrap();

    let call = module
        .get_function("main")
        .unwrap()
        .first_block()
        .unwrap()
        .first_instruction()
        .unwrap();

    assert!(index.defining_sites(call).unwrap().is_empty());
}

#[test]
fn phi_predecessors_are_their_incoming_blocks() {
    let (module, source) = fixture();
    let index = IrIndex::build(&module, &source).unwrap();

    let entry = module.get_function("sum").unwrap().first_block().unwrap();
    let total = entry.first_instruction().unwrap();
    let phi = entry.next().unwrap().first_instruction().unwrap();

    let sites: Vec<_> = index
        .predecessors(phi)
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(vec!["2, entry"], sites);

    assert_eq!(QueryError::NotAPhi, index.predecessors(total).unwrap_err());
}

#[test]
fn both_entry_blocks_keep_their_own_lines() {
    let (module, source) = fixture();
    let index = IrIndex::build(&module, &source).unwrap();

    let sum_entry = module.get_function("sum").unwrap().first_block().unwrap();
    let main_entry = module.get_function("main").unwrap().first_block().unwrap();

    // Same label text, distinct blocks.
    assert_eq!(2, index.location(IrValue::Block(sum_entry)).unwrap().line());
    assert_eq!(
        12,
        index.location(IrValue::Block(main_entry)).unwrap().line()
    );
}

#[test]
fn values_from_another_module_are_unknown() {
    let (module, source) = fixture();
    let index = IrIndex::build(&module, &source).unwrap();

    let other = Module::parse_ir("other", "define void @lone() {\nentry:\n  ret void\n}\n")
        .unwrap();
    let foreign = other.get_function("lone").unwrap();

    assert_eq!(
        QueryError::UnknownValue,
        index.uses(IrValue::Function(foreign)).unwrap_err()
    );
}
