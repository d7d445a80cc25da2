use argus_inspector_lib::index::IrIndex;
use log::warn;
use panoptes::{
    instruction::Instruction,
    module::Module,
    value::{IrValue, Value as _},
};

/// Prints the per-value report: one paragraph per function, one line per
/// block and instruction, each with its source line, use sites and defining
/// sites.
pub(crate) fn print(index: &IrIndex<'_>, module: &Module, filter: Option<&str>) {
    let mut matched = false;

    for function in module.functions() {
        let name = function.name();

        if filter.is_some_and(|filter| filter != name) {
            continue;
        }

        matched = true;

        // Declarations carry no body and never make it into the index.
        let Some(site) = index.describe(IrValue::Function(function)) else {
            continue;
        };

        println!("@{name}  [{site}]{}", uses_suffix(index, function.into()));

        for block in function.blocks() {
            if let Some(site) = index.describe(IrValue::Block(block)) {
                println!("  {}:  [{site}]{}", block.name(), uses_suffix(index, block.into()));
            }

            for instruction in block.instructions() {
                print_instruction(index, instruction);
            }
        }

        println!();
    }

    if let Some(filter) = filter
        && !matched
    {
        warn!("no function named \"@{filter}\" in the module");
    }
}

fn print_instruction(index: &IrIndex<'_>, instruction: Instruction<'_>) {
    let Some(site) = index.describe(IrValue::Instruction(instruction)) else {
        return;
    };

    print!("    {site}{}", uses_suffix(index, instruction.into()));

    if let Ok(sites) = index.defining_sites(instruction)
        && !sites.is_empty()
    {
        let rendered: Vec<_> = sites.iter().map(ToString::to_string).collect();
        print!("  defs: [{}]", rendered.join("; "));
    }

    if instruction.as_phi().is_some()
        && let Ok(sites) = index.predecessors(instruction)
    {
        let rendered: Vec<_> = sites.iter().map(ToString::to_string).collect();
        print!("  preds: [{}]", rendered.join("; "));
    }

    println!();
}

fn uses_suffix(index: &IrIndex<'_>, value: IrValue<'_>) -> String {
    match index.uses(value) {
        Ok(lines) if lines.is_empty() => String::new(),
        Ok(lines) => {
            let rendered: Vec<_> = lines.iter().map(ToString::to_string).collect();
            format!("  uses: lines {}", rendered.join(", "))
        }
        // A user outside the index (e.g. through a constant expression) is
        // not worth failing the whole report over.
        Err(_) => "  uses: ?".to_string(),
    }
}
