use crate::evaluator::Evaluator;
use crate::number::Number;
use num_traits::Float;

pub fn register<N: Number + Float>(evaluator: &Evaluator<N>) {
    evaluator.connect("floor", |x: N| x.floor());
    evaluator.connect("ceil", |x: N| x.ceil());
    evaluator.connect("round", |x: N| x.round());
    evaluator.connect("trunc", |x: N| x.trunc());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding() {
        let evaluator = Evaluator::<f32>::new();
        register(&evaluator);
        assert_eq!(evaluator.evaluate("floor(2.7)"), Ok(2.0));
        assert_eq!(evaluator.evaluate("ceil(2.2)"), Ok(3.0));
        assert_eq!(evaluator.evaluate("round(2.5)"), Ok(3.0));
        assert_eq!(evaluator.evaluate("trunc(-2.7)"), Ok(-2.0));
    }
}
