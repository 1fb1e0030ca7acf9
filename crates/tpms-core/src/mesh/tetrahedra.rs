//! Cell decomposition tables for iso-surface extraction

/// Corner offsets of one cell, indexed by `x | y << 1 | z << 2`
pub const CORNER_OFFSETS: [[usize; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [0, 1, 0],
    [1, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [0, 1, 1],
    [1, 1, 1],
];

/// Six-tetrahedra (Kuhn) decomposition of a cell
///
/// All six tetrahedra share the main diagonal between corners 0 and 7.
/// The decomposition is translation-invariant: the diagonal it induces on
/// any cell face matches the neighboring cell's choice, so surfaces
/// extracted from adjacent cells meet without cracks.
pub const TETRAHEDRA: [[usize; 4]; 6] = [
    [0, 1, 3, 7],
    [0, 1, 5, 7],
    [0, 2, 3, 7],
    [0, 2, 6, 7],
    [0, 4, 5, 7],
    [0, 4, 6, 7],
];
