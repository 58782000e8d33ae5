//! Zoghbi-Stojmenovic generators
//!
//! Both work on descending compositions and skip over the trailing ones
//! instead of rewriting them. `zs1` visits partitions in reverse
//! lexicographic order starting from `[n]`; `zs2` runs forwards from the
//! all-ones partition.

use super::Buffer;
use crate::partition::{Visitor, CAPACITY};

pub fn zs1<V: Visitor + ?Sized>(n: u32, visitor: &mut V) -> u64 {
    let mut a = Buffer::new(n, 1);
    a[0] = n;
    a.emit(1, visitor);
    // m: number of parts, h: index of the last part > 1
    let mut m = 1usize;
    let mut h = 0usize;
    while a[0] != 1 {
        if a[h] == 2 {
            m += 1;
            a[h] = 1;
            h = h.saturating_sub(1);
        } else {
            let r = a[h] - 1;
            let mut t = (m - h) as u32;
            a[h] = r;
            while t >= r {
                h += 1;
                a[h] = r;
                t -= r;
            }
            if t == 0 {
                m = h + 1;
            } else {
                m = h + 2;
                if t > 1 {
                    h += 1;
                    a[h] = t;
                }
            }
        }
        a.emit(m, visitor);
    }
    a.count()
}

/// Works 1-based over a private array with a zero sentinel in slot 0 and
/// copies each partition out to the visitor.
pub fn zs2<V: Visitor + ?Sized>(n: u32, visitor: &mut V) -> u64 {
    let mut out = Buffer::new(n, 0);
    let size = n as usize;
    let mut x = [1u32; CAPACITY];
    out.emit_copy(&x[1..=size], visitor);
    if n == 1 {
        return out.count();
    }
    x[0] = 0;
    x[1] = 2;
    let mut h = 1usize;
    let mut m = size - 1;
    out.emit_copy(&x[1..=m], visitor);
    while x[1] != n {
        if m - h > 1 {
            h += 1;
            x[h] = 2;
            m -= 1;
        } else {
            let mut j = m - 2;
            while x[j] == x[m - 1] {
                x[j] = 1;
                j -= 1;
            }
            h = j + 1;
            x[h] = x[m - 1] + 1;
            let r = x[m] + x[m - 1] * (m - h - 1) as u32;
            x[m] = 1;
            if m - h > 1 {
                x[m - 1] = 1;
            }
            m = h + r as usize - 1;
        }
        out.emit_copy(&x[1..=m], visitor);
    }
    out.count()
}
