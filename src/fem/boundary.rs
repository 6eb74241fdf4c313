use super::FemNode;
use crate::bounding_volume::Aabb;
use crate::math::Real;

/// Fixes every node lying less than `threshold` above the lowest node, along the `y` axis.
///
/// Other nodes are left untouched. Returns the number of nodes matching the criterion.
pub fn fix_boundary_nodes(nodes: &mut [FemNode], threshold: Real) -> usize {
    if nodes.is_empty() {
        return 0;
    }

    let aabb = Aabb::from_points_ref(nodes.iter().map(|n| &n.position));
    let limit = aabb.mins.y + threshold;
    let mut num_fixed = 0;

    for node in nodes.iter_mut() {
        if node.position.y < limit {
            node.is_fixed = true;
            num_fixed += 1;
        }
    }

    num_fixed
}

#[cfg(test)]
mod test {
    use super::fix_boundary_nodes;
    use crate::fem::FemNode;
    use crate::math::{Point, Real};

    #[test]
    fn bottom_nodes_are_fixed() {
        let mut nodes: Vec<_> = (0..10)
            .map(|i| FemNode::new(Point::new(0.3, i as Real * 0.1 - 0.2, 1.0), false))
            .collect();

        // Only y = -0.2, -0.1 and 0.0 are below -0.2 + 0.25.
        assert_eq!(fix_boundary_nodes(&mut nodes, 0.25), 3);

        for (i, node) in nodes.iter().enumerate() {
            assert_eq!(node.is_fixed, i < 3);
        }
    }

    #[test]
    fn fixed_nodes_stay_fixed() {
        let mut nodes = vec![
            FemNode::new(Point::new(0.0, 0.0, 0.0), true),
            FemNode::new(Point::new(0.0, 1.0, 0.0), true),
        ];
        nodes[1].is_fixed = true;

        assert_eq!(fix_boundary_nodes(&mut nodes, 0.1), 1);
        assert!(nodes.iter().all(|n| n.is_fixed));
    }

    #[test]
    fn empty_nodes() {
        assert_eq!(fix_boundary_nodes(&mut [], 0.1), 0);
    }
}
