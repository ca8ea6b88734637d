//! Double-double arithmetic: an unevaluated sum of two `f64` values giving about 106 bits of
//! significand. Only the operations needed by the robust predicates are provided.
use std::ops;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DD {
    pub hi: f64,
    pub lo: f64,
}

#[inline]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;
    let err = (a - (s - bb)) + (b - bb);
    (s, err)
}

#[inline]
fn quick_two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let err = b - (s - a);
    (s, err)
}

#[inline]
fn two_prod(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    let err = a.mul_add(b, -p);
    (p, err)
}

impl DD {
    #[inline]
    pub const fn new(value: f64) -> Self {
        DD { hi: value, lo: 0.0 }
    }

    #[inline]
    fn from_parts(hi: f64, lo: f64) -> Self {
        let (hi, lo) = quick_two_sum(hi, lo);
        DD { hi, lo }
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.hi + self.lo
    }

    #[inline]
    pub fn is_nan(&self) -> bool {
        self.hi.is_nan()
    }

    /// Returns -1, 0 or 1 according to the sign of the value.
    #[inline]
    pub fn signum(&self) -> i32 {
        if self.hi > 0.0 || (self.hi == 0.0 && self.lo > 0.0) {
            1
        } else if self.hi < 0.0 || (self.hi == 0.0 && self.lo < 0.0) {
            -1
        } else {
            0
        }
    }
}

impl From<f64> for DD {
    #[inline]
    fn from(value: f64) -> Self {
        DD::new(value)
    }
}

impl ops::Add<DD> for DD {
    type Output = DD;
    #[inline]
    fn add(self, rhs: DD) -> DD {
        let (s, e) = two_sum(self.hi, rhs.hi);
        let (t, f) = two_sum(self.lo, rhs.lo);
        let (s, e) = quick_two_sum(s, e + t);
        DD::from_parts(s, e + f)
    }
}

impl ops::Add<f64> for DD {
    type Output = DD;
    #[inline]
    fn add(self, rhs: f64) -> DD {
        self + DD::new(rhs)
    }
}

impl ops::Neg for DD {
    type Output = DD;
    #[inline]
    fn neg(self) -> DD {
        DD {
            hi: -self.hi,
            lo: -self.lo,
        }
    }
}

impl ops::Sub<DD> for DD {
    type Output = DD;
    #[inline]
    fn sub(self, rhs: DD) -> DD {
        self + (-rhs)
    }
}

impl ops::Sub<f64> for DD {
    type Output = DD;
    #[inline]
    fn sub(self, rhs: f64) -> DD {
        self + DD::new(-rhs)
    }
}

impl ops::Mul<DD> for DD {
    type Output = DD;
    #[inline]
    fn mul(self, rhs: DD) -> DD {
        let (p, e) = two_prod(self.hi, rhs.hi);
        let e = e + (self.hi * rhs.lo + self.lo * rhs.hi);
        DD::from_parts(p, e)
    }
}

impl ops::Mul<f64> for DD {
    type Output = DD;
    #[inline]
    fn mul(self, rhs: f64) -> DD {
        self * DD::new(rhs)
    }
}

impl ops::Div<DD> for DD {
    type Output = DD;
    #[inline]
    fn div(self, rhs: DD) -> DD {
        let q1 = self.hi / rhs.hi;
        let r = self - rhs * q1;
        let q2 = r.hi / rhs.hi;
        let r = r - rhs * q2;
        let q3 = r.hi / rhs.hi;
        DD::from_parts(q1, q2) + q3
    }
}
