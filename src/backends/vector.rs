use crate::numeric::Numeric;

/// A trait for vector-like containers of numeric values.
///
/// Batch evaluation reads its input points from, and writes its results into, any type
/// implementing this trait. Implementations exist for `Vec<T>` and `[T; N]`, and behind
/// the `ndarray` and `nalgebra` features for `Array1<T>` and `DVector<T>`.
///
/// # Examples
///
/// ```rust
/// use symfn::prelude::Vector;
/// use symfn::Complex;
///
/// let vec: Vec<Complex> = Vector::zeros(5);
/// assert_eq!(Vector::len(&vec), 5);
/// assert_eq!(vec[0], Complex::ZERO);
/// ```
pub trait Vector<T: Numeric> {
    /// Returns a reference to the vector's data as a slice.
    ///
    /// # Panics
    ///
    /// The `Array1` implementation panics if the array is not contiguous in memory.
    fn as_slice(&self) -> &[T];

    /// Returns a mutable reference to the vector's data as a slice.
    ///
    /// # Panics
    ///
    /// The `Array1` implementation panics if the array is not contiguous in memory.
    fn as_mut_slice(&mut self) -> &mut [T];

    /// Creates a new vector of the specified length filled with zeros.
    ///
    /// # Panics
    ///
    /// The `[T; N]` implementation panics if `len != N`.
    fn zeros(len: usize) -> Self;

    /// Returns the length of the vector.
    fn len(&self) -> usize;

    /// Checks if the vector is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Numeric> Vector<T> for Vec<T> {
    fn as_slice(&self) -> &[T] {
        self
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }

    fn zeros(len: usize) -> Self {
        vec![T::zero(); len]
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

/// Implementation of Vector for ndarray's Array1.
///
/// Arrays created by ndarray's constructors are contiguous; views with custom strides
/// are not supported.
///
/// # Examples
///
/// ```rust
/// use symfn::prelude::Vector;
/// use ndarray::Array1;
///
/// let mut vec = <Array1<f64> as Vector<f64>>::zeros(3);
/// Vector::as_mut_slice(&mut vec)[0] = 1.0;
/// assert_eq!(vec[0], 1.0);
/// ```
#[cfg(feature = "ndarray")]
impl<T: Numeric> Vector<T> for ndarray::Array1<T> {
    fn as_slice(&self) -> &[T] {
        ndarray::Array1::as_slice(self).expect("Array1 must be contiguous")
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        self.as_slice_mut().expect("Array1 must be contiguous")
    }

    fn zeros(len: usize) -> Self {
        ndarray::Array1::from_elem(len, T::zero())
    }

    fn len(&self) -> usize {
        ndarray::Array1::len(self)
    }
}

/// Implementation of Vector for nalgebra's DVector.
///
/// # Examples
///
/// ```rust
/// use symfn::prelude::Vector;
/// use nalgebra::DVector;
///
/// let mut vec = <DVector<f64> as Vector<f64>>::zeros(3);
/// Vector::as_mut_slice(&mut vec)[0] = 1.0;
/// assert_eq!(vec[0], 1.0);
/// ```
#[cfg(feature = "nalgebra")]
impl<T: Numeric> Vector<T> for nalgebra::DVector<T> {
    fn as_slice(&self) -> &[T] {
        nalgebra::DVector::as_slice(self)
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        nalgebra::DVector::as_mut_slice(self)
    }

    fn zeros(len: usize) -> Self {
        nalgebra::DVector::from_element(len, T::zero())
    }

    fn len(&self) -> usize {
        nalgebra::DVector::len(self)
    }
}

/// Implementation of Vector for fixed-size arrays.
///
/// # Examples
///
/// ```rust
/// use symfn::prelude::Vector;
///
/// let mut arr = <[f64; 3] as Vector<f64>>::zeros(3);
/// Vector::as_mut_slice(&mut arr)[0] = 1.0;
/// assert_eq!(arr[0], 1.0);
/// ```
impl<T: Numeric, const N: usize> Vector<T> for [T; N] {
    fn as_slice(&self) -> &[T] {
        self
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }

    fn zeros(len: usize) -> Self {
        assert_eq!(len, N, "Array length must match const generic size");
        std::array::from_fn(|_| T::zero())
    }

    fn len(&self) -> usize {
        N
    }
}
