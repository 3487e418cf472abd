use calc_rs::{evaluate_json, Evaluator};

fn main() {
    pretty_env_logger::init();

    let request = r#"[
        { "leftOperand": 10, "operator": "+", "rightOperand": 100 },
        {
            "leftOperand": { "leftOperand": 1, "operator": "+", "rightOperand": 2 },
            "operator": "*",
            "rightOperand": { "leftOperand": 1, "operator": "/", "rightOperand": 5 }
        },
        { "leftOperand": 1, "operator": "/", "rightOperand": 0 }
    ]"#;

    match evaluate_json(request) {
        Ok(result) => {
            for (i, value) in result.into_vec().iter().enumerate() {
                println!("Result {}: {}", i, value);
            }
        }
        Err(err) => println!("Error: {}", err),
    }

    if let Err(err) = Evaluator::new().evaluate_batch(&[]) {
        println!("Empty batch: {}", err);
    }
}
