use mathexpr_rs::token::render;
use mathexpr_rs::Evaluator;

fn main() {
    pretty_env_logger::init();

    let evaluator = Evaluator::<f64>::new();
    evaluator.connect("rate", || 0.05);
    evaluator.connect("compound", |principal: f64, rate: f64, years: f64| {
        principal * (1.0 + rate).powf(years)
    });

    let postfix = match evaluator.parse("compound(1000, rate(), 10) - 1000") {
        Ok(postfix) => postfix,
        Err(err) => {
            eprintln!("Failed to parse: {err}");
            return;
        }
    };
    println!("Postfix: {}", render(&postfix));

    for rate in [0.05, 0.07, 0.1] {
        evaluator.connect("rate", move || rate);
        match evaluator.evaluate_postfix(&postfix) {
            Ok(interest) => println!("Interest at {rate}: {interest:.2}"),
            Err(err) => eprintln!("Evaluation failed: {err}"),
        }
    }
}
