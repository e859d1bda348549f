//! Myers shortest-edit-script diff
//!
//! Line-oriented diff between two documents. Lines keep their trailing
//! newline so concatenating segment text reproduces file content exactly.

/// One line of a document, 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'d> {
    pub number: usize,
    pub text: &'d str,
}

/// One step of the edit script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit<'d> {
    Delete { line: Line<'d> },
    Insert { line: Line<'d> },
    Equal { line_a: Line<'d>, line_b: Line<'d> },
}

/// Split a document into newline-inclusive lines.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

pub struct MyersDiff<'d> {
    a: Vec<Line<'d>>,
    b: Vec<Line<'d>>,
}

impl<'d> MyersDiff<'d> {
    pub fn new(a: &'d str, b: &'d str) -> Self {
        MyersDiff {
            a: Self::lines(split_lines(a)),
            b: Self::lines(split_lines(b)),
        }
    }

    fn lines(texts: Vec<&'d str>) -> Vec<Line<'d>> {
        texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Line {
                number: i + 1,
                text,
            })
            .collect()
    }

    /// The edit script transforming `a` into `b`.
    pub fn diff(&self) -> Vec<Edit<'d>> {
        if self.a.is_empty() && self.b.is_empty() {
            return Vec::new();
        }

        let mut edits = Vec::new();

        for (prev_x, prev_y, x, y) in self.backtrack() {
            if x == prev_x {
                // only y advanced: insertion from b
                if prev_y < self.b.len() as isize {
                    edits.push(Edit::Insert {
                        line: self.b[prev_y as usize],
                    });
                }
            } else if y == prev_y {
                // only x advanced: deletion from a
                if prev_x < self.a.len() as isize {
                    edits.push(Edit::Delete {
                        line: self.a[prev_x as usize],
                    });
                }
            } else if prev_x < self.a.len() as isize {
                // diagonal: lines match
                edits.push(Edit::Equal {
                    line_a: self.a[prev_x as usize],
                    line_b: self.b[prev_y as usize],
                });
            }
        }

        edits.reverse();
        edits
    }

    /// Forward pass: record the furthest-reaching x per diagonal for each
    /// edit distance until the bottom-right corner is reached.
    fn shortest_edit_trace(&self) -> Vec<Vec<isize>> {
        let (n, m) = (self.a.len() as isize, self.b.len() as isize);
        let offset = (n + m) as usize;

        let mut v = vec![0isize; 2 * offset + 1];
        let mut trace = Vec::new();

        for d in 0..=(n + m) {
            trace.push(v.clone());

            for k in (-d..=d).step_by(2) {
                let idx = (offset as isize + k) as usize;

                let mut x = if k == -d {
                    v[idx + 1]
                } else if k == d {
                    v[idx - 1] + 1
                } else {
                    let from_deletion = v[idx - 1] + 1;
                    let from_insertion = v[idx + 1];
                    from_deletion.max(from_insertion)
                };

                let mut y = x - k;
                while x < n && y < m && self.a[x as usize].text == self.b[y as usize].text {
                    x += 1;
                    y += 1;
                }

                v[idx] = x;

                if x >= n && y >= m {
                    return trace;
                }
            }
        }

        trace
    }

    /// Backward pass: walk the trace from (n, m) to (0, 0), emitting the
    /// moves taken. Returned newest-first; `diff` reverses.
    fn backtrack(&self) -> Vec<(isize, isize, isize, isize)> {
        let (mut x, mut y) = (self.a.len() as isize, self.b.len() as isize);
        let offset = (x + y) as usize;
        let trace = self.shortest_edit_trace();

        let mut path = Vec::new();

        for (d, v) in trace.iter().enumerate().rev() {
            let k = x - y;

            let prev_k = if k == -(d as isize) {
                k + 1
            } else if k == d as isize {
                k - 1
            } else {
                let down = v[(offset as isize + k - 1) as usize] + 1;
                let right = v[(offset as isize + k + 1) as usize];
                if down > right { k - 1 } else { k + 1 }
            };

            let prev_x = v[(offset as isize + prev_k) as usize];
            let prev_y = prev_x - prev_k;

            while x > prev_x && y > prev_y {
                path.push((x - 1, y - 1, x, y));
                x -= 1;
                y -= 1;
            }

            if d > 0 {
                path.push((prev_x, prev_y, x, y));
            }

            (x, y) = (prev_x, prev_y);
        }

        path
    }
}
