use calc_rs::ast::parse_batch;
use calc_rs::{Evaluator, Operand};
use log::debug;

fn main() {
    pretty_env_logger::init();

    let tree = (Operand::from(1.0) + Operand::from(2.0)) * (Operand::from(1.0) / 5.0);
    debug!("built: {tree:?}");
    println!("{} = {}", tree, Evaluator::new().evaluate_operand(&tree));

    let batch = parse_batch("1 + 1; 2 * (3 - 4); 7 / 2").expect("Failed to parse");
    debug!("parsed: {batch:#?}");

    let evaluator = Evaluator::with_parallel_threshold(2);
    match evaluator.evaluate_batch(&batch) {
        Ok(results) => {
            for (operation, result) in batch.iter().zip(results) {
                println!("{} = {}", operation, result);
            }
        }
        Err(err) => println!("Error: {}", err),
    }
}
