use crate::number::Number;
use std::fmt;
use std::sync::Arc;

pub type Function<N> = Arc<dyn Fn(&[N]) -> Result<N, String> + Send + Sync>;

/// A host function with a fixed number of positional arguments.
#[derive(Clone)]
pub struct Callback<N> {
    arity: usize,
    function: Function<N>,
}

impl<N> Callback<N> {
    pub fn new<F>(arity: usize, function: F) -> Self
    where
        F: Fn(&[N]) -> N + Send + Sync + 'static,
    {
        Self::try_new(arity, move |args| Ok(function(args)))
    }

    /// Creates a callback whose invocation may fail with a message.
    pub fn try_new<F>(arity: usize, function: F) -> Self
    where
        F: Fn(&[N]) -> Result<N, String> + Send + Sync + 'static,
    {
        Self {
            arity,
            function: Arc::new(function),
        }
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn apply(&self, args: &[N]) -> Result<N, String> {
        if args.len() != self.arity {
            return Err(format!(
                "Expected {} arguments, but got {}",
                self.arity,
                args.len()
            ));
        }
        (self.function)(args)
    }
}

impl<N> fmt::Debug for Callback<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Conversion into a [`Callback`], inferring the arity from the parameter count.
///
/// Implemented for closures and functions taking up to eight `N` parameters and
/// returning `N`, and for `Callback<N>` itself. `Marker` only disambiguates the
/// implementations and is always inferred.
pub trait IntoCallback<N, Marker> {
    fn into_callback(self) -> Callback<N>;
}

impl<N> IntoCallback<N, Callback<N>> for Callback<N> {
    fn into_callback(self) -> Callback<N> {
        self
    }
}

macro_rules! number_param {
    ($_arg:ident, $number:ident) => {
        $number
    };
}

macro_rules! impl_into_callback {
    ($arity:literal => $($arg:ident),*) => {
        impl<N, F> IntoCallback<N, fn($(number_param!($arg, N)),*) -> N> for F
        where
            N: Number,
            F: Fn($(number_param!($arg, N)),*) -> N + Send + Sync + 'static,
        {
            fn into_callback(self) -> Callback<N> {
                let function = self;
                Callback::try_new($arity, move |args: &[N]| match args {
                    [$($arg),*] => Ok(function($(*$arg),*)),
                    _ => Err(format!(
                        "Expected {} arguments, but got {}",
                        $arity,
                        args.len()
                    )),
                })
            }
        }
    };
}

impl_into_callback!(0 =>);
impl_into_callback!(1 => a);
impl_into_callback!(2 => a, b);
impl_into_callback!(3 => a, b, c);
impl_into_callback!(4 => a, b, c, d);
impl_into_callback!(5 => a, b, c, d, e);
impl_into_callback!(6 => a, b, c, d, e, f);
impl_into_callback!(7 => a, b, c, d, e, f, g);
impl_into_callback!(8 => a, b, c, d, e, f, g, h);
