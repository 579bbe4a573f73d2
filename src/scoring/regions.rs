use crate::scoring::overlap::OverlapMatrix;

/// A maximal 4-connected component of non-zero overlap cells, the local
/// neighborhood within which candidate pairs compete for alignment. Cells are
/// sorted lexicographically by `(ref_idx, hyp_idx)`.
pub type Region = Vec<(usize, usize)>;

/// Partition the non-zero cells of an overlap matrix into connected regions
/// (row/column adjacency, no diagonals), the same grouping
/// connected-component labeling produces on an image. Regions come back
/// ordered by their lexicographically smallest cell.
pub fn extract_regions(matrix: &OverlapMatrix) -> Vec<Region> {
    let rows = matrix.rows();
    let cols = matrix.cols();
    let mut visited = vec![false; rows * cols];
    let mut regions = Vec::new();

    for i in 0..rows {
        for j in 0..cols {
            if visited[i * cols + j] || matrix.get(i, j) == 0.0 {
                continue;
            }

            // Flood fill from the seed cell.
            let mut region = Vec::new();
            let mut stack = vec![(i, j)];
            visited[i * cols + j] = true;
            while let Some((r, c)) = stack.pop() {
                region.push((r, c));
                let mut visit = |nr: usize, nc: usize| {
                    if !visited[nr * cols + nc] && matrix.get(nr, nc) != 0.0 {
                        visited[nr * cols + nc] = true;
                        stack.push((nr, nc));
                    }
                };
                if r > 0 {
                    visit(r - 1, c);
                }
                if r + 1 < rows {
                    visit(r + 1, c);
                }
                if c > 0 {
                    visit(r, c - 1);
                }
                if c + 1 < cols {
                    visit(r, c + 1);
                }
            }

            region.sort_unstable();
            regions.push(region);
        }
    }

    regions
}
