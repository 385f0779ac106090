//! Implementation checklist shown next to the generated manifests

/// Steps to follow before shipping the generated manifests
pub const CHECKLIST: [&str; 6] = [
    "Use multi-stage builds to keep Docker images small and secure.",
    "Ensure your Node.js app listens on the port defined in the deployment.",
    "Implement /health and /ready endpoints for Kubernetes probes.",
    "Store sensitive credentials in Kubernetes Secrets, not ConfigMaps.",
    "Use HorizontalPodAutoscaler to handle traffic spikes automatically.",
    "Review the resource limits to prevent OOM errors and CPU throttling.",
];
