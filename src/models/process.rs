/// One process row as shown in the ranked table and offered to the
/// kill prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessEntry {
    pub pid:     u32,
    pub name:    String,
    pub cpu_pct: f64,
    pub mem_pct: f64,
}

/// Top `limit` processes by CPU, descending. The sort is stable so
/// ties keep the provider's enumeration order.
pub fn rank_processes(mut entries: Vec<ProcessEntry>, limit: usize) -> Vec<ProcessEntry> {
    entries.sort_by(|a, b| {
        b.cpu_pct
            .partial_cmp(&a.cpu_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries.truncate(limit);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pid: u32, cpu: f64) -> ProcessEntry {
        ProcessEntry { pid, name: format!("p{}", pid), cpu_pct: cpu, mem_pct: 0.0 }
    }

    #[test]
    fn ranks_by_cpu_descending_and_truncates() {
        let input = vec![entry(1, 5.0), entry(2, 80.0), entry(3, 30.0), entry(4, 95.0), entry(5, 10.0)];
        let ranked = rank_processes(input, 3);
        let cpus: Vec<f64> = ranked.iter().map(|p| p.cpu_pct).collect();
        assert_eq!(cpus, vec![95.0, 80.0, 30.0]);
    }

    #[test]
    fn never_longer_than_limit() {
        let input: Vec<ProcessEntry> = (0..50).map(|i| entry(i, i as f64)).collect();
        assert_eq!(rank_processes(input, 10).len(), 10);
        assert!(rank_processes(vec![entry(1, 1.0)], 10).len() <= 10);
    }

    #[test]
    fn ties_keep_enumeration_order() {
        let input = vec![entry(10, 20.0), entry(11, 20.0), entry(12, 20.0)];
        let ranked = rank_processes(input, 3);
        let pids: Vec<u32> = ranked.iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![10, 11, 12]);
    }
}
