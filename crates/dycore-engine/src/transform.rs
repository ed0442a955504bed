//! Conversions between caller variables and the kernel's variables.
//!
//! The kernel integrates virtual temperature and the log of surface
//! pressure. All outputs are column-major. Inputs must share one shape;
//! callers validate shapes before converting.

use ndarray::{Array, ArrayView, Dimension, ShapeBuilder, Zip};

fn fortran_zeros<D: Dimension>(like: &ArrayView<'_, f64, D>) -> Array<f64, D> {
    Array::zeros(like.raw_dim().f())
}

/// `T_virt = T * (1 + fvirt * q)`.
pub fn virtual_temperature<D: Dimension>(
    temperature: ArrayView<'_, f64, D>,
    humidity: ArrayView<'_, f64, D>,
    fvirt: f64,
) -> Array<f64, D> {
    let mut out = fortran_zeros(&temperature);
    Zip::from(&mut out)
        .and(&temperature)
        .and(&humidity)
        .for_each(|o, &t, &q| *o = t * (1.0 + fvirt * q));
    out
}

/// `T = T_virt / (1 + fvirt * q)`, the inverse of [`virtual_temperature`].
pub fn temperature_from_virtual<D: Dimension>(
    virtual_temperature: ArrayView<'_, f64, D>,
    humidity: ArrayView<'_, f64, D>,
    fvirt: f64,
) -> Array<f64, D> {
    let mut out = fortran_zeros(&virtual_temperature);
    Zip::from(&mut out)
        .and(&virtual_temperature)
        .and(&humidity)
        .for_each(|o, &tv, &q| *o = tv / (1.0 + fvirt * q));
    out
}

/// `dT_virt/dt = dT/dt * (1 + fvirt * q) + fvirt * T_virt * dq/dt`.
pub fn virtual_temperature_tendency<D: Dimension>(
    temperature_tendency: ArrayView<'_, f64, D>,
    humidity: ArrayView<'_, f64, D>,
    virtual_temperature: ArrayView<'_, f64, D>,
    humidity_tendency: ArrayView<'_, f64, D>,
    fvirt: f64,
) -> Array<f64, D> {
    let mut out = fortran_zeros(&temperature_tendency);
    Zip::from(&mut out)
        .and(&temperature_tendency)
        .and(&humidity)
        .and(&virtual_temperature)
        .and(&humidity_tendency)
        .for_each(|o, &dt, &q, &tv, &dq| *o = dt * (1.0 + fvirt * q) + fvirt * tv * dq);
    out
}

/// `ln(ps)`.
pub fn log_surface_pressure<D: Dimension>(surface_pressure: ArrayView<'_, f64, D>) -> Array<f64, D> {
    let mut out = fortran_zeros(&surface_pressure);
    Zip::from(&mut out)
        .and(&surface_pressure)
        .for_each(|o, &ps| *o = ps.ln());
    out
}

/// `d(ln ps)/dt = (1 / ps) * dps/dt`.
pub fn log_surface_pressure_tendency<D: Dimension>(
    surface_pressure_tendency: ArrayView<'_, f64, D>,
    surface_pressure: ArrayView<'_, f64, D>,
) -> Array<f64, D> {
    let mut out = fortran_zeros(&surface_pressure);
    Zip::from(&mut out)
        .and(&surface_pressure_tendency)
        .and(&surface_pressure)
        .for_each(|o, &dps, &ps| *o = dps / ps);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dycore_kernel::is_fortran_layout;
    use ndarray::{arr1, Array3};
    use proptest::prelude::*;

    const FVIRT: f64 = 0.6077;

    #[test]
    fn virtual_temperature_known_values() {
        let t = arr1(&[300.0, 250.0]);
        let q = arr1(&[0.01, 0.0]);
        let tv = virtual_temperature(t.view(), q.view(), FVIRT);
        assert!((tv[0] - 300.0 * (1.0 + FVIRT * 0.01)).abs() < 1e-12);
        assert_eq!(tv[1], 250.0);
    }

    #[test]
    fn outputs_are_column_major() {
        let t = Array3::<f64>::from_elem((3, 4, 5), 280.0);
        let q = Array3::<f64>::from_elem((3, 4, 5), 0.002);
        let tv = virtual_temperature(t.view(), q.view(), FVIRT);
        assert!(is_fortran_layout(&tv));
        assert_eq!(tv.dim(), (3, 4, 5));
    }

    #[test]
    fn log_pressure_tendency_is_relative_rate() {
        let ps = arr1(&[1.0e5, 5.0e4]);
        let dps = arr1(&[10.0, 10.0]);
        let out = log_surface_pressure_tendency(dps.view(), ps.view());
        assert!((out[0] - 1.0e-4).abs() < 1e-18);
        assert!((out[1] - 2.0e-4).abs() < 1e-18);
        let ln = log_surface_pressure(ps.view());
        assert!((ln[0] - 1.0e5f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn virtual_tendency_formula() {
        let dt = arr1(&[1.0e-4]);
        let q = arr1(&[0.01]);
        let tv = arr1(&[301.8]);
        let dq = arr1(&[1.0e-7]);
        let out = virtual_temperature_tendency(dt.view(), q.view(), tv.view(), dq.view(), FVIRT);
        let expected = 1.0e-4 * (1.0 + FVIRT * 0.01) + FVIRT * 301.8 * 1.0e-7;
        assert!((out[0] - expected).abs() < 1e-18);
    }

    proptest! {
        #[test]
        fn virtual_round_trip(t in 150.0f64..330.0, q in 0.0f64..1.0) {
            let t_arr = arr1(&[t]);
            let q_arr = arr1(&[q]);
            let tv = virtual_temperature(t_arr.view(), q_arr.view(), FVIRT);
            let back = temperature_from_virtual(tv.view(), q_arr.view(), FVIRT);
            prop_assert!((back[0] - t).abs() <= 1e-10 * t);
        }
    }
}
