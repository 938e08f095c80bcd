//! # spectris
//!
//! Iterative eigenvalue solvers for dense, real-valued square matrices.
//! Pure Rust, no-std compatible (the solvers only need `alloc`).
//!
//! ## Quick start
//!
//! ```
//! use spectris::{Matrix, SolverConfig};
//! use spectris::solver::{EigenSolver, PowerMethod, QrMethod};
//!
//! let a = Matrix::from_rows(2, 2, &[2.0_f64, 0.0, 0.0, 1.0]);
//! let config = SolverConfig::new(1e-10, 200);
//!
//! // Dominant eigenpair via power iteration
//! let result = PowerMethod.solve(&a, &config).unwrap();
//! assert!((result.eigenvalue - 2.0).abs() < 1e-8);
//!
//! // Full spectrum via shifted QR with deflation
//! let spectrum = QrMethod.find_eigenvalues(&a, &config).unwrap();
//! assert_eq!(spectrum.len(), 2);
//! ```
//!
//! ## Modules
//!
//! - [`matrix`] — Heap-allocated `Matrix<T>` with runtime dimensions.
//!   Column-major `Vec<T>` storage. Includes arithmetic, indexing, norms,
//!   transpose, diagonal shifts, and a linear solver. [`Vector<T>`] is a
//!   single-index wrapper around a 1×n matrix.
//!
//! - [`linalg`] — LU (partial pivoting, pivot threshold relative to the
//!   matrix magnitude) and QR (Householder) decompositions. Free functions
//!   operate on `&mut impl MatrixMut<T>` for in-place use; [`linalg::Lu`]
//!   and [`linalg::Qr`] wrapper structs offer a higher-level API.
//!
//! - [`solver`] — The eigenvalue solvers. [`solver::PowerMethod`] finds the
//!   dominant eigenpair, [`solver::InversePowerMethod`] the eigenpair
//!   nearest a shift, [`solver::QrMethod`] the full real spectrum via
//!   shifted QR iteration with deflation. All three implement
//!   [`solver::EigenSolver`] and are driven by a [`SolverConfig`].
//!
//! - [`io`] — Matrix construction from text formats (CSV, a MatrixMarket-like
//!   coordinate format, whitespace-delimited tables), selected explicitly by
//!   [`io::MatrixFormat`]. Requires the `std` feature.
//!
//! - [`traits`] — Element trait hierarchy:
//!   - [`Scalar`] — all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`] — real floats (`Scalar + Float`), used by norms,
//!     decompositions, and every solver
//!   - [`MatrixRef`] / [`MatrixMut`] — generic read/write access for algorithms
//!
//! ## Error model
//!
//! Matrix and decomposition operations return [`linalg::LinalgError`]
//! (`DimensionMismatch`, `Singular`). Solvers return
//! [`solver::SolverError`], which adds `DidNotConverge` carrying the best
//! partial estimates when the iteration budget runs out. Errors surface
//! immediately; there is no internal retry and no fallback to a different
//! algorithm.
//!
//! ## Cargo features
//!
//! | Feature   | Default  | Description |
//! |-----------|----------|-------------|
//! | `std`     | yes      | Implies `alloc`. Hardware FPU via system libm; enables [`io`] |
//! | `alloc`   | via std  | Heap-allocated `Matrix` / `Vector` and all solvers |
//! | `libm`    | no       | Pure-Rust software float fallback for no-std targets |

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
pub mod io;
#[cfg(feature = "alloc")]
pub mod linalg;
#[cfg(feature = "alloc")]
pub mod matrix;
#[cfg(feature = "alloc")]
pub mod solver;
pub mod traits;

#[cfg(feature = "alloc")]
pub use matrix::{Matrix, Vector};
#[cfg(feature = "alloc")]
pub use solver::{EigenResult, SolverConfig};
pub use traits::{FloatScalar, MatrixMut, MatrixRef, Scalar};
