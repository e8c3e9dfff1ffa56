pub trait Message: Clone + Send + 'static{}

//blanket impl for all types that meet constraints
impl<T: Clone + Send + 'static> Message for T{}
