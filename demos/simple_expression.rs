use log::debug;
use mathexpr_rs::functions::register_functions;
use mathexpr_rs::{mathexpr_fn, Evaluator};

#[mathexpr_fn]
fn average(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}

#[mathexpr_fn]
fn safe_divide(a: f64, b: f64) -> Result<f64, String> {
    if b == 0.0 {
        return Err(format!("Cannot divide {a} by zero"));
    }
    Ok(a / b)
}

fn main() {
    pretty_env_logger::init();

    let evaluator = Evaluator::<f64>::new();
    register_functions(&evaluator);
    evaluator.connect("average", average());
    evaluator.connect("safe_divide", safe_divide());
    evaluator.connect("scale", |x: f64, factor: f64| x * factor);
    debug!("Functions: {:?}", evaluator.function_names());

    let expressions = [
        "2 * (3 + 7)",
        "2 ** 3 ** 2",
        "5! != !8",
        "average(4, 10) * scale(2, 1.5)",
        "sqrt(hypot(3, 4)) + floor(pi)",
        "safe_divide(1, 0)",
        "(2 + 3",
    ];

    for expression in expressions {
        match evaluator.evaluate(expression) {
            Ok(value) => println!("{expression} = {value}"),
            Err(err) => println!("{expression} -> {} ({err})", err.code()),
        }
    }

    let integer = mathexpr_rs::evaluate::<i64>("7 // 2 + 10 % 4");
    println!("7 // 2 + 10 % 4 = {integer:?}");
}
