use dyn_clone::DynClone;

// Define a trait for the objective function
pub trait ObjFn: DynClone {
    fn call(&self, x: f64) -> f64;
}
dyn_clone::clone_trait_object!(ObjFn);

// Wrapper for single-dimensional functions
#[derive(Clone)]
pub struct SingleDimFn<F>(pub F)
where
    F: Fn(f64) -> f64 + Clone;

impl<F> SingleDimFn<F>
where
    F: Fn(f64) -> f64 + Clone,
{
    pub fn new(f: F) -> Self {
        SingleDimFn(f)
    }
}

impl<F> ObjFn for SingleDimFn<F>
where
    F: Fn(f64) -> f64 + Clone,
{
    fn call(&self, x: f64) -> f64 {
        (self.0)(x)
    }
}
