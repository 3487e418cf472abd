use calc_rs::evaluate_expression;

fn main() {
    pretty_env_logger::init();

    let expressions = ["(1 + 2) * (1 / 5)", "10 - 4 - 3", "1 / 0", "2 +"];

    for expression in expressions {
        match evaluate_expression(expression) {
            Ok(result) => println!("{} = {}", expression, result),
            Err(err) => println!("{}: {}", expression, err),
        }
    }
}
