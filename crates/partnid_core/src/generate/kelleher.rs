//! Kelleher's generators
//!
//! `rule_asc` and `accel_asc` work on ascending compositions, `rule_desc`
//! and `accel_desc` on descending ones. The "accel" variants special-case
//! the last two parts and avoid rescanning the tail on every step.
//!
//! Callers handle `n == 0`; every function here expects `1 <= n <= MAX_N`.

use super::Buffer;
use crate::partition::Visitor;

/// Ascending partitions in lexicographic order, one part at a time.
pub fn rule_asc<V: Visitor + ?Sized>(n: u32, visitor: &mut V) -> u64 {
    let mut a = Buffer::new(n, 0);
    a[1] = n;
    let mut k = 1usize;
    while k != 0 {
        let mut y = a[k] - 1;
        k -= 1;
        let x = a[k] + 1;
        while x <= y {
            a[k] = x;
            y -= x;
            k += 1;
        }
        a[k] = x + y;
        a.emit(k + 1, visitor);
    }
    a.count()
}

/// Descending partitions in reverse lexicographic order.
pub fn rule_desc<V: Visitor + ?Sized>(n: u32, visitor: &mut V) -> u64 {
    let mut a = Buffer::new(n, 0);
    a[0] = n;
    a.emit(1, visitor);
    let last = n as usize - 1;
    let mut k = 0usize;
    while k != last {
        let l = k;
        let mut m = a[k];
        while m == 1 {
            k -= 1;
            m = a[k];
        }
        let mut rest = m + (l - k) as u32;
        m -= 1;
        while m < rest {
            a[k] = m;
            rest -= m;
            k += 1;
        }
        a[k] = rest;
        a.emit(k + 1, visitor);
    }
    a.count()
}

/// Ascending partitions; the two trailing parts are stepped in a tight loop.
pub fn accel_asc<V: Visitor + ?Sized>(n: u32, visitor: &mut V) -> u64 {
    let mut a = Buffer::new(n, 0);
    let mut k = 1usize;
    let mut y = n - 1;
    while k != 0 {
        k -= 1;
        let mut x = a[k] + 1;
        while 2 * x <= y {
            a[k] = x;
            y -= x;
            k += 1;
        }
        let l = k + 1;
        while x <= y {
            a[k] = x;
            a[l] = y;
            a.emit(l + 1, visitor);
            x += 1;
            y -= 1;
        }
        y += x - 1;
        a[k] = y + 1;
        a.emit(k + 1, visitor);
    }
    a.count()
}

/// Descending partitions; a trailing run of ones is tracked implicitly.
pub fn accel_desc<V: Visitor + ?Sized>(n: u32, visitor: &mut V) -> u64 {
    let mut a = Buffer::new(n, 1);
    a[0] = n;
    a.emit(1, visitor);
    if n == 1 {
        return a.count();
    }
    // k: index of the last part, q: index of the last part > 1
    let mut k = 0usize;
    let mut q = 0usize;
    loop {
        if a[q] == 2 {
            k += 1;
            a[q] = 1;
            a.emit(k + 1, visitor);
            if q == 0 {
                break;
            }
            q -= 1;
        } else {
            let m = a[q] - 1;
            let mut rest = (k - q + 1) as u32;
            a[q] = m;
            while rest >= m {
                q += 1;
                a[q] = m;
                rest -= m;
            }
            if rest == 0 {
                k = q;
            } else {
                k = q + 1;
                if rest > 1 {
                    q += 1;
                    a[q] = rest;
                }
            }
            a.emit(k + 1, visitor);
        }
    }
    a.count()
}
