//! Merca's ascending-composition generators
//!
//! Refinements of `accel_asc` that unroll the innermost one (`merca1`,
//! `merca2`) or two (`merca3`) levels of the frontier walk. All three visit
//! ascending partitions in lexicographically increasing order.

use super::Buffer;
use crate::partition::Visitor;

/// Explicit stack-top variant: `top` counts the fixed prefix.
pub fn merca1<V: Visitor + ?Sized>(n: u32, visitor: &mut V) -> u64 {
    let mut a = Buffer::new(n, 0);
    let mut top = 0usize;
    let mut x = 1u32;
    let mut y = n - 1;
    loop {
        while 2 * x <= y {
            a[top] = x;
            top += 1;
            y -= x;
        }
        while x <= y {
            a[top] = x;
            a[top + 1] = y;
            a.emit(top + 2, visitor);
            x += 1;
            y -= 1;
        }
        a[top] = x + y;
        a.emit(top + 1, visitor);
        if top == 0 {
            break;
        }
        y += x;
        top -= 1;
        x = a[top] + 1;
        y -= 1;
    }
    a.count()
}

pub fn merca2<V: Visitor + ?Sized>(n: u32, visitor: &mut V) -> u64 {
    let mut a = Buffer::new(n, 0);
    let mut k = 0usize;
    let mut x = 1u32;
    let mut y = n - 1;
    loop {
        while 2 * x <= y {
            a[k] = x;
            y -= x;
            k += 1;
        }
        let t = k + 1;
        while x <= y {
            a[k] = x;
            a[t] = y;
            a.emit(t + 1, visitor);
            x += 1;
            y -= 1;
        }
        y += x - 1;
        a[k] = y + 1;
        a.emit(k + 1, visitor);
        if k == 0 {
            break;
        }
        k -= 1;
        x = a[k] + 1;
    }
    a.count()
}

/// Fastest of the family; the default for verification runs.
pub fn merca3<V: Visitor + ?Sized>(n: u32, visitor: &mut V) -> u64 {
    let mut a = Buffer::new(n, 0);
    let mut k = 0usize;
    let mut x = 1u32;
    let mut y = n - 1;
    loop {
        while 3 * x <= y {
            a[k] = x;
            y -= x;
            k += 1;
        }
        let t = k + 1;
        let u = k + 2;
        while 2 * x <= y {
            a[k] = x;
            a[t] = x;
            a[u] = y - x;
            a.emit(u + 1, visitor);
            let mut r = x + 1;
            let mut s = y - r;
            while r <= s {
                a[t] = r;
                a[u] = s;
                a.emit(u + 1, visitor);
                r += 1;
                s -= 1;
            }
            a[t] = y;
            a.emit(t + 1, visitor);
            x += 1;
            y -= 1;
        }
        while x <= y {
            a[k] = x;
            a[t] = y;
            a.emit(t + 1, visitor);
            x += 1;
            y -= 1;
        }
        y += x - 1;
        a[k] = y + 1;
        a.emit(k + 1, visitor);
        if k == 0 {
            break;
        }
        k -= 1;
        x = a[k] + 1;
    }
    a.count()
}
