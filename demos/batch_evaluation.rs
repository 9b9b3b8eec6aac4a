use mathexpr_rs::functions::register_functions;
use mathexpr_rs::Evaluator;

fn main() {
    pretty_env_logger::init();

    let evaluator = Evaluator::<f64>::new();
    register_functions(&evaluator);
    evaluator.set_constant("price", 120.0);
    evaluator.set_constant("volume", 3000.0);

    let expressions = [
        "price > 100 && volume < 5000",
        "price * volume / 1000",
        "max(price, 150) - min(volume, 2000) / 100",
        "round(ln(volume) * 100) / 100",
        "price / (volume - 3000)",
    ];

    let results = evaluator.evaluate_batch(&expressions);
    for (i, (expression, result)) in expressions.iter().zip(results).enumerate() {
        println!("Result {i}: {expression} => {result:?}");
    }
}
